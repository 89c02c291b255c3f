//! Contains tests for the top level command line.

// tests `help` is printed to stdout
wrap3test!(print_help, |_prj, cmd| {
    cmd.arg("help");
    let stdout = cmd.assert_success();
    assert!(stdout.contains("compile"), "{stdout}");
});

wrap3test!(print_compile_help, |_prj, cmd| {
    cmd.args(["compile", "--help"]);
    let stdout = cmd.assert_success();
    for flag in ["--lang", "--target", "--package", "--contracts", "--node", "--output"] {
        assert!(stdout.contains(flag), "missing {flag} in:\n{stdout}");
    }
});

// a missing action is a usage error
wrap3test!(requires_action, |prj, cmd| {
    cmd.assert_code(2);
    assert!(prj.list(".").is_empty());
});

wrap3test!(rejects_unknown_action, |prj, cmd| {
    cmd.args(["deploy", "-l", "java", "-t", "Token"]);
    let stderr = cmd.assert_code(2);
    assert!(stderr.contains("deploy"), "{stderr}");
    assert!(prj.tool_log().is_empty());
});
