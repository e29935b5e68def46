mod account;
mod channel;

pub use account::InMemoryAccountRepository;
pub use channel::InMemoryChannelRepository;
