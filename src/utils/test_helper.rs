//! various helper functions used to simplify unit tests.
//!
//! **Note**: This module is only compiled and used during testing. Hence, ther might be no
//! further documentation show up.

#[cfg(test)]
pub mod test_helper {
    use log::Level;

    fn check_logs(level: Level, expected: &[&str]) {
        testing_logger::validate(|captured_logs| {
            let captured_logs: Vec<_> = captured_logs
                .iter()
                .filter(|l| l.level == level)
                .collect();
            assert_eq!(
                captured_logs.len(),
                expected.len(),
                "captured: {:?}",
                captured_logs.iter().map(|l| &l.body).collect::<Vec<_>>()
            );
            for (log, body) in captured_logs.iter().zip(expected) {
                assert_eq!(log.body, *body);
            }
        });
    }
    pub fn check_warnings(expected_warnings: Vec<&str>) {
        check_logs(Level::Warn, &expected_warnings);
    }
    pub fn check_infos(expected_infos: Vec<&str>) {
        check_logs(Level::Info, &expected_infos);
    }
    pub fn check_errors(expected_errors: Vec<&str>) {
        check_logs(Level::Error, &expected_errors);
    }
}
