mod command;
mod items;
mod query;

pub use self::command::OrderCommandRepository;
pub use self::query::OrderQueryRepository;
