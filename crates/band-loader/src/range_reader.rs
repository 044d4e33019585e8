//! Blocking `Read + Seek` over HTTP range requests.
//!
//! Remote bytes are fetched in fixed-size blocks and kept for the lifetime of
//! the reader, so the TIFF decoder's many small header reads cost one request
//! per block.

use std::collections::HashMap;
use std::io::{self, Read, Seek, SeekFrom};

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_RANGE, RANGE};
use reqwest::StatusCode;
use tracing::trace;

/// Default block size (512KB)
pub const DEFAULT_BLOCK_SIZE: u64 = 512 * 1024;

pub struct HttpRangeReader {
    client: Client,
    url: String,
    position: u64,
    length: Option<u64>,
    block_size: u64,
    blocks: HashMap<u64, Vec<u8>>,
    requests: usize,
}

impl HttpRangeReader {
    pub fn new(client: Client, url: impl Into<String>, block_size: u64) -> Self {
        Self {
            client,
            url: url.into(),
            position: 0,
            length: None,
            block_size: block_size.max(1),
            blocks: HashMap::new(),
            requests: 0,
        }
    }

    /// Number of HTTP requests issued so far.
    pub fn requests(&self) -> usize {
        self.requests
    }

    /// Total length of the remote object, fetching the first block if needed.
    pub fn len(&mut self) -> io::Result<u64> {
        if self.length.is_none() {
            self.fetch_block(0)?;
        }
        self.length
            .ok_or_else(|| io_error(format!("{}: unknown content length", self.url)))
    }

    pub fn is_empty(&mut self) -> io::Result<bool> {
        Ok(self.len()? == 0)
    }

    fn fetch_block(&mut self, index: u64) -> io::Result<()> {
        if self.blocks.contains_key(&index) {
            return Ok(());
        }

        let start = index * self.block_size;
        let mut end = start + self.block_size - 1;
        if let Some(length) = self.length {
            if start >= length {
                self.blocks.insert(index, Vec::new());
                return Ok(());
            }
            end = end.min(length - 1);
        }

        trace!(url = %self.url, start, end, "Range request");
        self.requests += 1;
        let response = self
            .client
            .get(&self.url)
            .header(RANGE, format!("bytes={}-{}", start, end))
            .send()
            .map_err(|e| io_error(format!("{}: {}", self.url, e)))?;

        match response.status() {
            StatusCode::PARTIAL_CONTENT => {
                if let Some(total) = response
                    .headers()
                    .get(CONTENT_RANGE)
                    .and_then(|v| v.to_str().ok())
                    .and_then(parse_content_range_total)
                {
                    self.length = Some(total);
                }
                let bytes = response
                    .bytes()
                    .map_err(|e| io_error(format!("{}: {}", self.url, e)))?;
                self.blocks.insert(index, bytes.to_vec());
            }
            StatusCode::OK => {
                // Server ignored the range; keep the whole object split into blocks
                let bytes = response
                    .bytes()
                    .map_err(|e| io_error(format!("{}: {}", self.url, e)))?;
                self.length = Some(bytes.len() as u64);
                for (i, chunk) in bytes.chunks(self.block_size as usize).enumerate() {
                    self.blocks.insert(i as u64, chunk.to_vec());
                }
                self.blocks.entry(index).or_default();
            }
            StatusCode::RANGE_NOT_SATISFIABLE => {
                self.blocks.insert(index, Vec::new());
            }
            status => {
                return Err(io_error(format!(
                    "{}: unexpected status {}",
                    self.url,
                    status.as_u16()
                )));
            }
        }
        Ok(())
    }
}

impl Read for HttpRangeReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if let Some(length) = self.length {
            if self.position >= length {
                return Ok(0);
            }
        }

        let index = self.position / self.block_size;
        let offset = (self.position % self.block_size) as usize;
        self.fetch_block(index)?;

        let block = match self.blocks.get(&index) {
            Some(block) if offset < block.len() => block,
            _ => return Ok(0),
        };
        let count = buf.len().min(block.len() - offset);
        buf[..count].copy_from_slice(&block[offset..offset + count]);
        self.position += count as u64;
        Ok(count)
    }
}

impl Seek for HttpRangeReader {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::Current(delta) => self.position.checked_add_signed(delta),
            SeekFrom::End(delta) => self.len()?.checked_add_signed(delta),
        };
        let target = target.ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "seek to a negative position")
        })?;
        self.position = target;
        Ok(target)
    }
}

/// Total size from a `Content-Range: bytes 0-99/1234` header.
fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit('/').next()?.trim().parse().ok()
}

fn io_error(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::Other, message)
}
