//! Solidity ABI bindings for the contracts the savings suite drives.

use alloy::sol;

sol! {
    /// OpenZeppelin-style ERC20 mock with unrestricted mint and burn.
    #[sol(rpc)]
    interface ERC20Mock {
        event Transfer(address indexed from, address indexed to, uint256 value);
        event Approval(address indexed owner, address indexed spender, uint256 value);

        function name() external view returns (string memory name);
        function symbol() external view returns (string memory symbol);
        function decimals() external view returns (uint8 decimals);
        function totalSupply() external view returns (uint256 supply);
        function balanceOf(address account) external view returns (uint256 balance);
        function allowance(address owner, address spender) external view returns (uint256 remaining);

        function transfer(address to, uint256 amount) external returns (bool success);
        function approve(address spender, uint256 amount) external returns (bool success);
        function transferFrom(address from, address to, uint256 amount) external returns (bool success);

        function mint(address account, uint256 amount) external;
        function burn(address account, uint256 amount) external;
    }
}

sol! {
    /// Savings DAI: an ERC-4626 vault over DAI accruing the DSR.
    #[sol(rpc)]
    interface ISavingsDai {
        event Deposit(address indexed sender, address indexed owner, uint256 assets, uint256 shares);
        event Withdraw(address indexed sender, address indexed receiver, address indexed owner, uint256 assets, uint256 shares);

        function dai() external view returns (address token);
        function pot() external view returns (address pot);
        function asset() external view returns (address token);
        function totalAssets() external view returns (uint256 assets);
        function balanceOf(address account) external view returns (uint256 balance);

        function convertToShares(uint256 assets) external view returns (uint256 shares);
        function convertToAssets(uint256 shares) external view returns (uint256 assets);
        function previewDeposit(uint256 assets) external view returns (uint256 shares);
        function previewRedeem(uint256 shares) external view returns (uint256 assets);
        function maxWithdraw(address owner) external view returns (uint256 assets);

        function deposit(uint256 assets, address receiver) external returns (uint256 shares);
        function mint(uint256 shares, address receiver) external returns (uint256 assets);
        function withdraw(uint256 assets, address receiver, address owner) external returns (uint256 shares);
        function redeem(uint256 shares, address receiver, address owner) external returns (uint256 assets);

        function approve(address spender, uint256 amount) external returns (bool success);
        function transfer(address to, uint256 amount) external returns (bool success);
    }
}
