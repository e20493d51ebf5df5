//! MySQL repository implementations.

pub mod account_repository_impl;
pub mod token_repository_impl;

pub use account_repository_impl::MySqlAccountRepository;
pub use token_repository_impl::MySqlTokenRepository;
