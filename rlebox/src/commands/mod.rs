pub mod compress;
pub mod extract;
pub mod list;
pub mod test;

pub use compress::run as compress;
pub use extract::run as extract;
pub use list::run as list;
pub use test::run as test;
