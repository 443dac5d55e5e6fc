pub mod server;

pub use server::McpServer;
