pub mod linker;
pub mod locks;
pub mod resolver;

pub use linker::SocialLinker;
pub use locks::PairLocks;
pub use resolver::InviteResolver;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
