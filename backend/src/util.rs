use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
#[error("Gave up after {0} attempts")]
pub struct RetryFailed(pub u32);

// Runs `f` once plus up to `retries` more times until it succeeds
pub fn retry<T, E, F>(retries: u32, mut f: F) -> Result<T, RetryFailed>
where
    F: FnMut() -> Result<T, E>,
    E: std::error::Error,
{
    let mut attempt = 0;
    loop {
        match f() {
            Ok(value) => return Ok(value),
            Err(err) if attempt < retries => {
                attempt += 1;
                warn!("Retry {} of {} triggered. Error: {}", attempt, retries, err);
            }
            Err(err) => {
                warn!("No more retry attempts. Error: {}", err);
                return Err(RetryFailed(attempt + 1));
            }
        }
    }
}
