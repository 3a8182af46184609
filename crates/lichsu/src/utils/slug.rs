//! 越南语标题转 URL slug
//!
//! 去掉声调与帽形符号（ắ → a，ở → o，đ → d），只保留小写 ASCII 字母和数字，
//! 其余字符一律折叠成单个 `-`。

use crate::error::ToolError;

/// 基础字母 → 所有带附加符号的小写变体
const VIETNAMESE_VARIANTS: [(char, &str); 7] = [
    ('a', "àáạảãâầấậẩẫăằắặẳẵ"),
    ('e', "èéẹẻẽêềếệểễ"),
    ('i', "ìíịỉĩ"),
    ('o', "òóọỏõôồốộổỗơờớợởỡ"),
    ('u', "ùúụủũưừứựửữ"),
    ('y', "ỳýỵỷỹ"),
    ('d', "đ"),
];

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

fn fold_char(c: char) -> Option<char> {
    if c.is_ascii_alphanumeric() {
        return Some(c.to_ascii_lowercase());
    }
    VIETNAMESE_VARIANTS
        .iter()
        .find(|(_, variants)| variants.contains(c))
        .map(|(base, _)| *base)
}

pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars().flat_map(char::to_lowercase) {
        // NFD 输入里的组合音调符号直接丢弃，不当作分隔符
        if is_combining_mark(c) {
            continue;
        }
        match fold_char(c) {
            Some(folded) => {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.push(folded);
            }
            None => pending_dash = true,
        }
    }

    slug
}

/// 与 [`slugify`] 相同，但空结果视为错误
pub fn require_slug(input: &str) -> Result<String, ToolError> {
    let slug = slugify(input);
    if slug.is_empty() {
        return Err(ToolError::EmptySlug(input.to_string()));
    }
    Ok(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_strips_tones() {
        assert_eq!(slugify("Chiến thắng Bạch Đằng năm 938"), "chien-thang-bach-dang-nam-938");
        assert_eq!(slugify("Điện Biên Phủ"), "dien-bien-phu");
        assert_eq!(slugify("Chữ Quốc ngữ"), "chu-quoc-ngu");
        assert_eq!(slugify("Lý Thường Kiệt"), "ly-thuong-kiet");
        assert_eq!(slugify("Kỷ Hồng Bàng"), "ky-hong-bang");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  Hai Bà Trưng!!  "), "hai-ba-trung");
        assert_eq!(slugify("Nhà Lý & Nhà Trần"), "nha-ly-nha-tran");
        assert_eq!(slugify("trống--đồng__Đông Sơn"), "trong-dong-dong-son");
    }

    #[test]
    fn test_slugify_decomposed_input() {
        // "Hà Nội" 以 NFD 形式书写
        assert_eq!(slugify("Ha\u{0300} No\u{0302}\u{0323}i"), "ha-noi");
    }

    #[test]
    fn test_slugify_unknown_characters_are_separators() {
        assert_eq!(slugify("Đại Việt 大越 sử ký"), "dai-viet-su-ky");
        assert_eq!(slugify("café"), "cafe");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!! ---"), "");
        assert!(require_slug("…").is_err());
        assert_eq!(require_slug("Nhà Nguyễn").unwrap(), "nha-nguyen");
    }
}
