use alloy::sol;

// The ERC-20/721/1155 call surface the wallet attributes against. Selectors
// and signatures come from the generated `SolCall` impls.
sol! {
    function transfer(address to, uint256 value);
    function approve(address spender, uint256 value);
    function transferFrom(address from, address to, uint256 value);
    function safeTransferFrom(address from, address to, uint256 tokenId);
    function safeBatchTransferFrom(address from, address to, uint256[] ids, uint256[] values, bytes data);
    function setApprovalForAll(address operator, bool approved);
}
