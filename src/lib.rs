pub mod api;
pub mod api_docs;
pub mod config;
pub mod domain;
pub mod modules;
pub mod server;
pub mod state;

pub use modules::integrations::bnf;
pub use modules::integrations::google_books;
pub use modules::integrations::openlibrary;
pub use modules::lookup::Resolver;
