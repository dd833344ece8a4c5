use envconfig::Envconfig;

#[derive(Envconfig, Clone, Debug)]
pub struct Config {
    /// Port of the gRPC listener serving the trigger and health services.
    #[envconfig(from = "PORT", default = "9000")]
    pub port: u16,
}
