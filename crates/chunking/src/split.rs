//! Splitting text that is too long for a single chunk.

/// Split `text` into pieces of at most `max` characters.
///
/// Each cut prefers the last whitespace in the back half of the window and
/// falls back to a hard cut at `max`. With a non-zero `overlap`, the next
/// piece starts `overlap` characters before the cut. Requires
/// `overlap < max`.
pub fn split_text(text: &str, max: usize, overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut pieces = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        if chars.len() - start <= max {
            pieces.push(chars[start..].iter().collect::<String>());
            break;
        }

        let window_end = start + max;
        let cut = (start + max / 2 + 1..window_end)
            .rev()
            .find(|&i| chars[i].is_whitespace())
            .unwrap_or(window_end);
        pieces.push(chars[start..cut].iter().collect::<String>());

        let next = cut.saturating_sub(overlap);
        start = if next > start { next } else { cut };
        if overlap == 0 {
            while start < chars.len() && chars[start].is_whitespace() {
                start += 1;
            }
        }
    }

    pieces
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}
