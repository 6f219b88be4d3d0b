use std::io;
use std::path::Path;

use log::LevelFilter;

/// Install the global logger. Everything down to Debug goes to `log_file`
/// when one is given; stderr only sees records at `stderr_level` or above.
/// The terminal UI passes [`LevelFilter::Off`] so nothing is written under
/// its screen.
pub fn init(log_file: Option<&Path>, stderr_level: LevelFilter) -> Result<(), fern::InitError> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .chain(
            fern::Dispatch::new()
                .level(stderr_level)
                .chain(io::stderr()),
        );

    if let Some(path) = log_file {
        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .level(LevelFilter::Debug)
                .chain(fern::log_file(path)?),
        );
    }

    dispatch.apply()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_receives_debug_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("connect-four.log");
        init(Some(&path), LevelFilter::Off).unwrap();

        log::debug!("search finished");
        log::logger().flush();

        let contents = std::fs::read_to_string(&path).unwrap();
        let line = contents
            .lines()
            .find(|line| line.ends_with("search finished"))
            .unwrap();
        assert!(line.contains("[DEBUG]"));
        assert!(line.contains("[connect_four::logging::tests]"));
    }
}
