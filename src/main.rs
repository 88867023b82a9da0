#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    school_notice_server::run().await?;
    Ok(())
}
