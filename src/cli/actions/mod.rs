pub mod server;

#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        users: Vec<String>,
        session_ttl: u64,
    },
}
