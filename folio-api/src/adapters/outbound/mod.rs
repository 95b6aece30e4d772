#[cfg(test)]
mod mock;
mod postgres;

#[cfg(test)]
pub use mock::MockProjectRepository;
pub use postgres::PostgresProjectRepository;
