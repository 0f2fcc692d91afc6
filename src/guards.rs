use actix_web::guard::GuardContext;

pub const INTERNAL_KEY_HEADER: &str = "Coinbill-Key";

pub fn internal_key_guard(ctx: &GuardContext) -> bool {
    let key = std::env::var("INTERNAL_KEY")
        .expect("No INTERNAL_KEY set in .env file or environment");

    ctx.head()
        .headers()
        .get(INTERNAL_KEY_HEADER)
        .is_some_and(|it| it.as_bytes() == key.as_bytes())
}
