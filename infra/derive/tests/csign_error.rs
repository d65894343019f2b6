#[test]
fn csign_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/csign_error_pass.rs");
}
