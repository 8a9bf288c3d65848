use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub mail_service_url: String,
    pub mail_service_token: String,
    pub sms_service_url: String,
    pub sms_service_token: String,
    pub host_api_key: String,
    pub frontend_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            mail_service_url: env::var("MAIL_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8000/api/v1/send".to_string()),
            mail_service_token: env::var("MAIL_SERVICE_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
            sms_service_url: env::var("SMS_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8001/api/v1/send".to_string()),
            sms_service_token: env::var("SMS_SERVICE_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
            host_api_key: env::var("HOST_API_KEY").expect("HOST_API_KEY must be set"),
            frontend_url: env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3001".to_string()),
        }
    }
}
