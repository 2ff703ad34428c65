pub struct Args {
    pub bind: String,
    pub port: u16,
}

impl Args {
    pub fn parse() -> Self {
        let args: Vec<String> = std::env::args().collect();

        // Provide defaults here, but allow overrides
        Self {
            bind: get_arg_value(&args, "--bind").unwrap_or("0.0.0.0").to_string(),
            port: get_arg_value(&args, "--port")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
        }
    }
}

fn get_arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == key)
        .and_then(|pos| args.get(pos + 1))
        .map(|s| s.as_str())
}
