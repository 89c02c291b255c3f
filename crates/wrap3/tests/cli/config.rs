//! Contains tests for loading paths and tools from `wrap3.toml` and the environment.

use crate::constants::*;
use wrap3_test_utils::{FakeTool, TestProject};

fn setup_token(prj: &TestProject, contracts: &str) {
    prj.write(format!("{contracts}/Token.sol"), TOKEN);
    prj.write(format!("{contracts}/interfaces/IToken.sol"), ITOKEN);
    prj.add_dependency("contracts/token/ERC20/ERC20.sol", ERC20);
    prj.add_dependency("contracts/token/ERC20/IERC20.sol", IERC20);
}

wrap3test!(can_read_config_file, |prj, cmd| {
    setup_token(&prj, "src");
    prj.write_config(
        r#"
contracts = "src"
output = "bindings"
"#,
    );
    cmd.args(["compile", "-l", "abi", "-t", "Token"]);
    cmd.assert_success();
    assert_eq!(prj.list("bindings"), ["Token.abi", "Token.bin"]);
});

wrap3test!(flags_override_config_file, |prj, cmd| {
    setup_token(&prj, "contracts");
    prj.write_config(r#"output = "bindings""#);
    cmd.args(["compile", "-l", "abi", "-t", "Token", "-o", "generated"]);
    cmd.assert_success();
    assert_eq!(prj.list("generated"), ["Token.abi", "Token.bin"]);
    assert!(!prj.path("bindings").exists());
});

wrap3test!(env_overrides_config_file, |prj, cmd| {
    setup_token(&prj, "contracts");
    prj.write_config(
        r#"
output = "bindings"
workspace = "scratch"
"#,
    );
    cmd.set_env("WRAP3_OUTPUT", "from-env");
    cmd.args(["compile", "-l", "abi", "-t", "Token"]);
    cmd.assert_success();
    assert_eq!(prj.list("from-env"), ["Token.abi", "Token.bin"]);
    assert!(!prj.path("scratch").exists());
});

wrap3test!(can_use_alternate_config_file, |prj, cmd| {
    setup_token(&prj, "contracts");
    prj.write("ci.toml", r#"output = "ci-out""#);
    cmd.set_env("WRAP3_CONFIG", "ci.toml");
    cmd.args(["compile", "-l", "abi", "-t", "Token"]);
    cmd.assert_success();
    assert_eq!(prj.list("ci-out"), ["Token.abi", "Token.bin"]);
});

wrap3test!(can_set_tools_with_flags, |prj, cmd| {
    setup_token(&prj, "contracts");
    let abigen = prj.tool_path(FakeTool::Abigen);
    cmd.unset_env(&FakeTool::Abigen.env_key());
    cmd.args(["compile", "-l", "go", "-t", "Token", "-p", "token", "--abigen"]).arg(&abigen);
    cmd.assert_success();
    assert_eq!(prj.tools_run(), ["solc", "abigen"]);
});

wrap3test!(can_set_root, |prj, cmd| {
    setup_token(&prj, "app/contracts");
    prj.write("app/node_modules/@openzeppelin/contracts/token/ERC20/ERC20.sol", ERC20);
    prj.write("app/node_modules/@openzeppelin/contracts/token/ERC20/IERC20.sol", IERC20);
    cmd.args(["compile", "-l", "abi", "-t", "Token", "--root", "app"]);
    cmd.assert_success();
    assert_eq!(prj.list("app/wrap3"), ["Token.abi", "Token.bin"]);
    assert!(!prj.path("app/temp").exists());
});

wrap3test!(rejects_invalid_config_file, |prj, cmd| {
    setup_token(&prj, "contracts");
    prj.write_config("output = [1, 2]");
    cmd.args(["compile", "-l", "abi", "-t", "Token"]);
    let stderr = cmd.assert_code(1);
    assert!(stderr.contains("failed to extract wrap3 config"), "{stderr}");
    prj.assert_no_workspace();
});

wrap3test!(rejects_workspace_holding_inputs, |prj, cmd| {
    setup_token(&prj, "contracts");
    prj.write_config(r#"workspace = ".""#);
    cmd.args(["compile", "-l", "abi", "-t", "Token"]);
    let stderr = cmd.assert_code(1);
    assert!(stderr.contains("refusing to use"), "{stderr}");
    assert!(prj.path("contracts/Token.sol").is_file());
});

wrap3test!(rejects_workspace_resolving_to_root, |prj, cmd| {
    setup_token(&prj, "contracts");
    prj.write_config(r#"workspace = "contracts/..""#);
    cmd.args(["compile", "-l", "abi", "-t", "Token"]);
    let stderr = cmd.assert_code(1);
    assert!(stderr.contains("refusing to use"), "{stderr}");
    assert!(prj.path("contracts/Token.sol").is_file());
    assert!(prj.path("wrap3.toml").is_file());
    assert!(prj.tools_run().is_empty());
});

wrap3test!(rejects_output_inside_workspace, |prj, cmd| {
    setup_token(&prj, "contracts");
    cmd.args(["compile", "-l", "abi", "-t", "Token", "-o", "temp/out"]);
    let stderr = cmd.assert_code(1);
    assert!(stderr.contains("refusing to use"), "{stderr}");
    assert!(prj.tools_run().is_empty());
});

wrap3test!(rejects_contracts_holding_workspace, |prj, cmd| {
    setup_token(&prj, "contracts");
    cmd.args(["compile", "-l", "abi", "-t", "Token", "-c", "."]);
    let stderr = cmd.assert_code(1);
    assert!(stderr.contains("which is copied into it"), "{stderr}");
    assert!(prj.tools_run().is_empty());
    prj.assert_no_workspace();
});
