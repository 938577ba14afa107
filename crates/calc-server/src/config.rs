use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "calc-server")]
#[command(
    about = "Calculator backend - evaluates arithmetic expressions over HTTP",
    long_about = None
)]
pub struct ServerConfig {
    #[arg(long, default_value = "127.0.0.1", help = "Address to listen on")]
    pub host: String,

    #[arg(short, long, default_value_t = 3001, help = "Port to listen on")]
    pub port: u16,

    #[arg(
        long,
        default_value_t = 4096,
        value_name = "CHARS",
        help = "Longest expression accepted for evaluation"
    )]
    pub max_expression_len: usize,

    #[arg(
        long,
        default_value_t = 65536,
        value_name = "BYTES",
        help = "Largest request body accepted"
    )]
    pub max_body_bytes: usize,
}
