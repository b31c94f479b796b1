//! HTTP segment source backed by a reused libcurl easy handle.

use super::{Fetch, FetchError, SegmentSource, SourceSettings, StatusClass};
use crate::retry::run_with_retry;

/// Issues one GET per segment. The handle is reused so keep-alive connections
/// carry over between consecutive segments of a crawl.
pub struct RemoteSource {
    easy: curl::easy::Easy,
    settings: SourceSettings,
}

impl RemoteSource {
    pub fn new(settings: SourceSettings) -> Result<Self, curl::Error> {
        let mut easy = curl::easy::Easy::new();
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.connect_timeout(settings.connect_timeout)?;
        easy.timeout(settings.timeout)?;
        easy.useragent(concat!("tscat/", env!("CARGO_PKG_VERSION")))?;
        Ok(Self { easy, settings })
    }
}

/// Performs the GET and returns the status code with the collected body.
fn get(easy: &mut curl::easy::Easy, url: &str) -> Result<(u32, Vec<u8>), FetchError> {
    let mut body = Vec::new();
    easy.url(url)?;
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }
    let code = easy.response_code()?;
    Ok((code, body))
}

impl SegmentSource for RemoteSource {
    fn fetch(&mut self, address: &str) -> Result<Fetch, FetchError> {
        let Self { easy, settings } = self;
        run_with_retry(&settings.retry, || {
            let (code, body) = get(easy, address)?;
            match settings.terminal.classify(code) {
                StatusClass::Success => Ok(Fetch::Segment(body)),
                StatusClass::Terminal => {
                    tracing::debug!(url = address, status = code, "terminal status, end of stream");
                    Ok(Fetch::Terminal)
                }
                StatusClass::Failure => Err(FetchError::Http(code)),
            }
        })
    }
}
