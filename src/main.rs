#[tokio::main]
async fn main() {
    rsvp_backend::run().await;
}
