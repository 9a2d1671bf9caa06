// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Minimal RFC 5322 / MIME reader.
//!
//! Enough to pull the sender, subject and plain-text body out of mail a
//! person typed. Text is decoded as lossy UTF-8 whatever the charset.

use base64::Engine;

/// A message split into unfolded headers and a raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMail {
    headers: Vec<(String, String)>,
    body: String,
}

impl ParsedMail {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.replace("\r\n", "\n");
        let (head, body) = match raw.split_once("\n\n") {
            Some((head, body)) => (head, body),
            None => (raw.as_str(), ""),
        };

        let mut headers: Vec<(String, String)> = Vec::new();
        for line in head.lines() {
            if line.starts_with([' ', '\t']) {
                if let Some((_, value)) = headers.last_mut() {
                    value.push(' ');
                    value.push_str(line.trim());
                }
                continue;
            }
            if let Some((name, value)) = line.split_once(':') {
                headers.push((name.trim().to_string(), value.trim().to_string()));
            }
        }

        Self {
            headers,
            body: body.to_string(),
        }
    }

    /// First header with `name`, case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn subject(&self) -> &str {
        self.header("Subject").unwrap_or("")
    }

    /// Bare address from the `From` header, lowercased.
    pub fn sender_address(&self) -> Option<String> {
        let from = self.header("From")?;
        let address = match (from.rfind('<'), from.rfind('>')) {
            (Some(start), Some(end)) if start < end => &from[start + 1..end],
            _ => from,
        };
        let address = address.trim();
        if address.is_empty() {
            None
        } else {
            Some(address.to_lowercase())
        }
    }

    /// Decoded text of the first `text/plain` part, if any.
    pub fn text_body(&self) -> Option<String> {
        let content_type = self.header("Content-Type").unwrap_or("text/plain");
        let media_type = content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        if media_type.starts_with("multipart/") {
            let boundary = content_param(content_type, "boundary")?;
            return split_multipart(&self.body, &boundary)
                .iter()
                .find_map(|part| ParsedMail::parse(part).text_body());
        }
        if media_type != "text/plain" {
            return None;
        }

        let encoding = self
            .header("Content-Transfer-Encoding")
            .unwrap_or("7bit")
            .trim()
            .to_ascii_lowercase();
        let bytes = match encoding.as_str() {
            "base64" => decode_base64(&self.body),
            "quoted-printable" => decode_quoted_printable(&self.body),
            _ => self.body.as_bytes().to_vec(),
        };
        Some(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Value of parameter `name` in a structured header like `Content-Type`.
fn content_param(header: &str, name: &str) -> Option<String> {
    header.split(';').skip(1).find_map(|param| {
        let (key, value) = param.trim().split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case(name)
            .then(|| value.trim().trim_matches('"').to_string())
    })
}

fn split_multipart(body: &str, boundary: &str) -> Vec<String> {
    let delimiter = format!("--{}", boundary);
    let closing = format!("--{}--", boundary);
    let mut parts = Vec::new();
    let mut current: Option<Vec<&str>> = None;

    for line in body.lines() {
        let line_trimmed = line.trim_end();
        if line_trimmed == closing {
            break;
        }
        if line_trimmed == delimiter {
            if let Some(lines) = current.take() {
                parts.push(lines.join("\n"));
            }
            current = Some(Vec::new());
            continue;
        }
        if let Some(lines) = current.as_mut() {
            lines.push(line);
        }
    }
    if let Some(lines) = current {
        parts.push(lines.join("\n"));
    }
    parts
}

fn decode_base64(body: &str) -> Vec<u8> {
    let compact: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    match base64::engine::general_purpose::STANDARD.decode(compact.as_bytes()) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(error = %e, "invalid base64 body, using raw text");
            body.as_bytes().to_vec()
        }
    }
}

fn decode_quoted_printable(body: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len());
    let mut lines = body.split('\n').peekable();
    while let Some(line) = lines.next() {
        let line = line.trim_end_matches([' ', '\t']);
        let (line, soft_break) = match line.strip_suffix('=') {
            Some(rest) => (rest, true),
            None => (line, false),
        };
        let bytes = line.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'=' && i + 2 < bytes.len() {
                if let Some(b) = hex_byte(bytes[i + 1], bytes[i + 2]) {
                    out.push(b);
                    i += 3;
                    continue;
                }
            }
            out.push(bytes[i]);
            i += 1;
        }
        if !soft_break && lines.peek().is_some() {
            out.push(b'\n');
        }
    }
    out
}

fn hex_byte(hi: u8, lo: u8) -> Option<u8> {
    let digit = |c: u8| (c as char).to_digit(16);
    Some((digit(hi)? * 16 + digit(lo)?) as u8)
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
