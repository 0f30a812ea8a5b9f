// src/chunk.rs

/// Largest chunk posted to a channel; leaves room for the code fence.
pub const MAX_CHUNK_SIZE: usize = 1950;

pub fn page_header(page: usize) -> String {
    format!("--- Page {page} --- \n \n")
}

/// Split an ordered list into newline-joined, page-labelled blocks of at most
/// `max_size` characters. Items are never split, so an item longer than
/// `max_size` becomes its own oversized chunk.
pub fn chunk<S: AsRef<str>>(items: &[S], max_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut buf: Option<String> = None;

    for item in items {
        let item = item.as_ref();
        buf = Some(match buf.take() {
            None => item.to_string(),
            Some(current) => {
                let header = page_header(chunks.len() + 1);
                let len = current.chars().count() + item.chars().count() + header.chars().count();
                if len > max_size {
                    chunks.push(header + &current);
                    item.to_string()
                } else {
                    current + "\n" + item
                }
            }
        });
    }

    if let Some(last) = buf {
        chunks.push(page_header(chunks.len() + 1) + &last);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_headers(chunks: &[String]) -> Vec<String> {
        chunks
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let header = page_header(i + 1);
                assert!(c.starts_with(&header), "chunk {i} lacks its header");
                c[header.len()..].to_string()
            })
            .collect()
    }

    #[test]
    fn empty_input() {
        let items: [&str; 0] = [];
        assert!(chunk(&items, MAX_CHUNK_SIZE).is_empty());
    }

    #[test]
    fn single_item() {
        assert_eq!(chunk(&["a"], MAX_CHUNK_SIZE), vec!["--- Page 1 --- \n \na"]);
    }

    #[test]
    fn small_list_fits_one_chunk() {
        assert_eq!(
            chunk(&["a", "b"], MAX_CHUNK_SIZE),
            vec!["--- Page 1 --- \n \na\nb"]
        );
    }

    #[test]
    fn splits_when_header_would_overflow() {
        // header is 18 chars; "aaaa" + "bbbb" + 18 = 26
        let out = chunk(&["aaaa", "bbbb", "cc"], 25);
        assert_eq!(
            out,
            vec!["--- Page 1 --- \n \naaaa", "--- Page 2 --- \n \nbbbb\ncc"]
        );
        let out = chunk(&["aaaa", "bbbb"], 26);
        assert_eq!(out, vec!["--- Page 1 --- \n \naaaa\nbbbb"]);
    }

    #[test]
    fn oversized_item_is_kept_whole() {
        let big = "x".repeat(50);
        let out = chunk(&["a", big.as_str(), "b"], 30);
        assert_eq!(out.len(), 3);
        assert_eq!(out[1], format!("{}{big}", page_header(2)));
        assert_eq!(out[2], format!("{}b", page_header(3)));
    }

    #[test]
    fn last_item_is_never_dropped() {
        let out = chunk(&["aaaa", "bbbb"], 20);
        assert_eq!(strip_headers(&out), vec!["aaaa", "bbbb"]);
    }

    #[test]
    fn round_trip_preserves_order() {
        let items: Vec<String> = (0..500).map(|i| format!("Schematic{i:03}")).collect();
        for max in [40, 100, 333, MAX_CHUNK_SIZE, 100_000] {
            let out = chunk(&items, max);
            let joined = strip_headers(&out).join("\n");
            let back: Vec<&str> = joined.split('\n').collect();
            assert_eq!(back, items, "max_size {max}");
        }
    }

    #[test]
    fn chunks_respect_the_bound() {
        // only the separator before the last appended item goes uncounted
        let items: Vec<String> = (0..300).map(|i| format!("Build{i}")).collect();
        let out = chunk(&items, MAX_CHUNK_SIZE);
        assert!(out.len() > 1);
        for chunk in out {
            assert!(chunk.chars().count() <= MAX_CHUNK_SIZE + 1);
        }
    }
}
