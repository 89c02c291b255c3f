/// A macro to generate a new integration test case
///
/// The `wrap3test!` macro's first argument is the name of the test, the second argument is a
/// closure to configure and execute the test. The `TestProject` provides utility functions to
/// lay out the project's contracts and dependencies. The `TestCommand` is a wrapper around the
/// actual `wrap3` executable, running in the project root with fake `solc`, `web3j` and `abigen`
/// binaries configured.
///
/// # Example
///
/// ```ignore
/// use wrap3_test_utils::*;
/// wrap3test!(my_test, |prj, cmd| {
///     prj.add_source("Token.sol", "contract Token {}");
///     prj.add_dependency("contracts/access/Ownable.sol", "contract Ownable {}");
///     cmd.args(["compile", "-l", "abi", "-t", "Token"]);
///     cmd.assert_non_empty_stdout();
/// });
/// ```
#[macro_export]
macro_rules! wrap3test {
    ($(#[$attr:meta])* $test:ident, |$prj:ident, $cmd:ident| $e:expr) => {
        #[test]
        $(#[$attr])*
        fn $test() {
            #[allow(unused_mut)]
            let (mut $prj, mut $cmd) =
                $crate::util::setup_wrap3(stringify!($test), env!("CARGO_BIN_EXE_wrap3"));
            $e
        }
    };
}
