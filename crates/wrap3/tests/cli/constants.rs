//! Contract sources shared by the cli tests.

pub const TOKEN: &str = r#"// SPDX-License-Identifier: MIT
pragma solidity ^0.8.20;

import "@openzeppelin/contracts/token/ERC20/ERC20.sol";
import "./interfaces/IToken.sol";

contract Token is ERC20, IToken {
    constructor() ERC20("Token", "TKN") {}
}
"#;

pub const ITOKEN: &str = r#"// SPDX-License-Identifier: MIT
pragma solidity ^0.8.20;

import "@openzeppelin/contracts/token/ERC20/IERC20.sol";

interface IToken is IERC20 {}
"#;

pub const ERC20: &str = "// SPDX-License-Identifier: MIT\ncontract ERC20 {}\n";

pub const IERC20: &str = "// SPDX-License-Identifier: MIT\ninterface IERC20 {}\n";
