//! Desktop dashboard launcher.

fn main() {
    let exit_code = run_and_report(qreview_gui::run);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run_and_report<F, E>(runner: F) -> i32
where
    F: FnOnce() -> Result<(), E>,
    E: std::fmt::Display,
{
    match runner() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("qreview dashboard error: {}", err);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::run_and_report;

    #[test]
    fn clean_exit_reports_zero() {
        assert_eq!(run_and_report(|| Ok::<(), &str>(())), 0);
    }

    #[test]
    fn launch_failure_reports_non_zero() {
        assert_eq!(run_and_report(|| Err::<(), &str>("no display")), 1);
    }
}
