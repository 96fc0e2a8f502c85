#[test]
fn derive_describe() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/pass_*.rs");
    t.compile_fail("tests/ui/describe_*.rs");
    t.compile_fail("tests/ui/inject_*.rs");
}
