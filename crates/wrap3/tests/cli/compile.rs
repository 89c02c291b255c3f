//! Contains tests for `wrap3 compile`.

use crate::constants::*;
use wrap3_test_utils::{FakeTool, TestProject};

/// Lays out `Token.sol`, its interface and the package sources they import.
fn setup_token(prj: &TestProject) {
    prj.add_source("Token.sol", TOKEN);
    prj.add_source("interfaces/IToken.sol", ITOKEN);
    prj.add_dependency("contracts/token/ERC20/ERC20.sol", ERC20);
    prj.add_dependency("contracts/token/ERC20/IERC20.sol", IERC20);
}

wrap3test!(can_copy_abi_artifacts, |prj, cmd| {
    setup_token(&prj);
    cmd.args(["compile", "-l", "abi", "-t", "Token"]);
    let stdout = cmd.assert_success();

    assert!(stdout.contains("Compiler run successful!"), "{stdout}");
    assert!(stdout.contains("Bindings have been generated to"), "{stdout}");
    assert_eq!(prj.list("wrap3"), ["Token.abi", "Token.bin"]);
    assert_eq!(prj.read("wrap3/Token.bin"), "6080604052Token");
    assert_eq!(prj.read("wrap3/Token.abi"), r#"[{"type":"constructor","name":"Token"}]"#);
    assert_eq!(prj.tools_run(), ["solc"]);
    prj.assert_no_workspace();

    // the user's sources keep their package imports
    assert_eq!(prj.read("contracts/Token.sol"), TOKEN);
    assert_eq!(prj.read("contracts/interfaces/IToken.sol"), ITOKEN);
});

wrap3test!(can_generate_java, |prj, cmd| {
    setup_token(&prj);
    cmd.args(["compile", "--lang", "java", "--target", "Token", "--package", "com.example.token"]);
    cmd.assert_success();

    let java = prj.read("wrap3/com/example/token/Token.java");
    assert!(java.contains("package com.example.token;"), "{java}");
    assert_eq!(prj.tools_run(), ["solc", "web3j"]);

    let log = prj.tool_log();
    assert!(log[0].contains("--bin --abi --overwrite -o"), "{log:?}");
    assert!(log[1].starts_with("web3j generate solidity -b"), "{log:?}");
    assert!(log[1].ends_with("-p com.example.token"), "{log:?}");
    prj.assert_no_workspace();
});

wrap3test!(can_generate_go, |prj, cmd| {
    setup_token(&prj);
    cmd.args(["compile", "-l", "go", "-t", "Token", "-p", "token"]);
    cmd.assert_success();

    assert_eq!(prj.list("wrap3"), ["Token.go"]);
    let go = prj.read("wrap3/Token.go");
    assert!(go.starts_with("package token"), "{go}");
    assert!(go.contains(r#""name":"Token""#), "{go}");
    assert_eq!(prj.tools_run(), ["solc", "abigen"]);
    assert!(prj.tool_log()[1].ends_with("--pkg=token"));
    prj.assert_no_workspace();
});

wrap3test!(strips_sol_extension_from_target, |prj, cmd| {
    setup_token(&prj);
    cmd.args(["compile", "-l", "abi", "-t", "Token.sol"]);
    cmd.assert_success();
    assert_eq!(prj.list("wrap3"), ["Token.abi", "Token.bin"]);
});

wrap3test!(quiet_prints_nothing, |prj, cmd| {
    setup_token(&prj);
    cmd.args(["compile", "-l", "abi", "-t", "Token", "--quiet"]);
    cmd.assert_empty_stdout();
    assert_eq!(prj.list("wrap3"), ["Token.abi", "Token.bin"]);
});

// `java` and `go` need a package, nothing is created without one
wrap3test!(package_is_required, |prj, cmd| {
    setup_token(&prj);
    for lang in ["java", "go"] {
        cmd.fuse().args(["compile", "-l", lang, "-t", "Token"]);
        let stderr = cmd.assert_code(2);
        assert!(stderr.contains("--package"), "{stderr}");
    }
    assert_eq!(prj.list("."), ["contracts", "node_modules"]);
    assert!(prj.tool_log().is_empty());
});

wrap3test!(rejects_unsupported_lang, |prj, cmd| {
    setup_token(&prj);
    cmd.args(["compile", "-l", "rust", "-t", "Token", "-p", "token"]);
    let stderr = cmd.assert_code(2);
    assert!(stderr.contains("non-supported lang `rust`"), "{stderr}");
    assert_eq!(prj.list("."), ["contracts", "node_modules"]);
});

wrap3test!(solc_failure_stops_generation, |prj, cmd| {
    setup_token(&prj);
    cmd.fail_tool(FakeTool::Solc);
    cmd.args(["compile", "-l", "java", "-t", "Token", "-p", "com.example"]);
    let stderr = cmd.assert_code(1);

    assert!(stderr.contains("failed to compile with solc"), "{stderr}");
    assert!(stderr.contains("--overwrite"), "{stderr}");
    assert!(stderr.contains("ParserError"), "{stderr}");
    assert_eq!(prj.tools_run(), ["solc"]);
    assert_eq!(prj.list("."), ["contracts", "node_modules"]);
});

wrap3test!(generator_failure_removes_workspace, |prj, cmd| {
    setup_token(&prj);
    cmd.fail_tool(FakeTool::Web3j);
    cmd.args(["compile", "-l", "java", "-t", "Token", "-p", "com.example"]);
    let stderr = cmd.assert_code(1);

    assert!(stderr.contains("failed to generate Java wrappers with web3j"), "{stderr}");
    assert_eq!(prj.tools_run(), ["solc", "web3j"]);
    prj.assert_no_workspace();
});

// the fake solc rejects any staged source that still imports `@openzeppelin` by name
wrap3test!(rewrites_nested_imports, |prj, cmd| {
    setup_token(&prj);
    prj.add_source(
        "tokens/extensions/Capped.sol",
        r#"import "@openzeppelin/contracts/token/ERC20/ERC20.sol";
contract Capped is ERC20 {}
"#,
    );
    cmd.args(["compile", "-l", "abi", "-t", "Token"]);
    cmd.assert_success();
    prj.assert_no_workspace();
});

wrap3test!(missing_dependency_package, |prj, cmd| {
    prj.add_source("Token.sol", TOKEN);
    prj.write("node_modules/left-pad/index.js", "");
    cmd.args(["compile", "-l", "abi", "-t", "Token"]);
    let stderr = cmd.assert_code(1);

    assert!(stderr.contains("failed to copy folder - from:"), "{stderr}");
    assert!(stderr.contains("@openzeppelin"), "{stderr}");
    assert!(prj.tool_log().is_empty());
    prj.assert_no_workspace();
});

wrap3test!(missing_target_contract, |prj, cmd| {
    setup_token(&prj);
    cmd.args(["compile", "-l", "abi", "-t", "Vault"]);
    let stderr = cmd.assert_code(1);

    assert!(stderr.contains("contract `Vault` not found"), "{stderr}");
    assert!(prj.tool_log().is_empty());
    prj.assert_no_workspace();
});

wrap3test!(can_use_legacy_folder_flags, |prj, cmd| {
    prj.write("src/Token.sol", TOKEN);
    prj.write("src/interfaces/IToken.sol", ITOKEN);
    prj.write("deps/@openzeppelin/contracts/token/ERC20/ERC20.sol", ERC20);
    prj.write("deps/@openzeppelin/contracts/token/ERC20/IERC20.sol", IERC20);

    cmd.args(["compile", "-l", "abi", "-t", "Token", "-cf", "src", "-nf=deps", "-o", "out"]);
    cmd.assert_success();
    assert_eq!(prj.list("out"), ["Token.abi", "Token.bin"]);

    cmd.fuse().args([
        "compile",
        "-l",
        "abi",
        "-t",
        "Token",
        "--contract-folder",
        "src",
        "--node-module-folder",
        "deps",
        "--output",
        "aliased",
    ]);
    cmd.assert_success();
    assert_eq!(prj.list("aliased"), ["Token.abi", "Token.bin"]);
    prj.assert_no_workspace();
});

// reruns overwrite the previous output and replace a stale workspace
wrap3test!(can_rerun, |prj, cmd| {
    setup_token(&prj);
    prj.write("temp/contracts/Stale.sol", "contract Stale {}");
    prj.write("wrap3/Token.bin", "stale");

    cmd.args(["compile", "-l", "abi", "-t", "Token"]);
    cmd.assert_success();
    cmd.assert_success();

    assert_eq!(prj.read("wrap3/Token.bin"), "6080604052Token");
    assert_eq!(prj.tools_run(), ["solc", "solc"]);
    prj.assert_no_workspace();
});
