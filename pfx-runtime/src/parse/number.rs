//! # 数值扫描
//!
//! 与区域设置无关的浮点扫描（行为对齐 C 的 `strtof`），以及基于它的
//! 关键帧列表解析。手写扫描，无正则依赖。

/// `strtof` 视为空白的字符（含垂直制表符）
fn is_c_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// 十六进制尾数累积到该值后不再累加，只记录指数
const HEX_MANTISSA_LIMIT: f64 = (1u64 << 60) as f64;

/// `inf` / `infinity` / `nan` / `nan(n-char-seq)`（大小写不敏感）的前缀长度
fn special_len(b: &[u8]) -> Option<usize> {
    let starts_with =
        |word: &[u8]| b.len() >= word.len() && b[..word.len()].eq_ignore_ascii_case(word);

    if starts_with(b"infinity") {
        Some(8)
    } else if starts_with(b"inf") {
        Some(3)
    } else if starts_with(b"nan") {
        Some(3 + nan_payload_len(&b[3..]))
    } else {
        None
    }
}

/// `(` + `[A-Za-z0-9_]*` + `)`；不闭合时不消费
fn nan_payload_len(b: &[u8]) -> usize {
    if b.first() != Some(&b'(') {
        return 0;
    }
    let mut i = 1;
    while b.get(i).is_some_and(|c| c.is_ascii_alphanumeric() || *c == b'_') {
        i += 1;
    }
    if b.get(i) == Some(&b')') { i + 1 } else { 0 }
}

fn hex_digit(c: Option<&u8>) -> Option<u32> {
    c.and_then(|c| char::from(*c).to_digit(16))
}

/// 扫描无符号十六进制浮点 `0x h* [. h*] ([pP] [+-]? digits)?`
///
/// 尾数至少需要一位十六进制数字，否则返回 `None`（`0x` 按十进制 `0` 处理）。
fn hex_prefix(b: &[u8]) -> Option<(f64, usize)> {
    if b.first() != Some(&b'0') || !matches!(b.get(1), Some(b'x' | b'X')) {
        return None;
    }

    let mut i = 2;
    let mut mantissa = 0.0f64;
    let mut scale = 0i32;
    let mut digits = 0usize;

    while let Some(d) = hex_digit(b.get(i)) {
        if mantissa < HEX_MANTISSA_LIMIT {
            mantissa = mantissa * 16.0 + f64::from(d);
        } else {
            scale = scale.saturating_add(4);
        }
        digits += 1;
        i += 1;
    }

    if b.get(i) == Some(&b'.') {
        let mut j = i + 1;
        while let Some(d) = hex_digit(b.get(j)) {
            if mantissa < HEX_MANTISSA_LIMIT {
                mantissa = mantissa * 16.0 + f64::from(d);
                scale = scale.saturating_sub(4);
            }
            digits += 1;
            j += 1;
        }
        if digits > 0 {
            i = j;
        }
    }

    if digits == 0 {
        return None;
    }

    // 二进制指数同样必须带数字
    let mut exponent = 0i32;
    if matches!(b.get(i), Some(b'p' | b'P')) {
        let mut j = i + 1;
        let negative = match b.get(j) {
            Some(b'-') => {
                j += 1;
                true
            }
            Some(b'+') => {
                j += 1;
                false
            }
            _ => false,
        };
        let exp_end = digits_from(b, j);
        if exp_end > j {
            for c in &b[j..exp_end] {
                exponent = exponent
                    .saturating_mul(10)
                    .saturating_add(i32::from(c - b'0'));
            }
            if negative {
                exponent = -exponent;
            }
            i = exp_end;
        }
    }

    let power = scale.saturating_add(exponent).clamp(-2200, 2200);
    Some((mantissa * 2f64.powi(power), i))
}

fn digits_from(b: &[u8], mut i: usize) -> usize {
    while b.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    i
}

/// 返回 `b` 开头可构成浮点字面量的最长前缀长度，0 表示无法扫描
///
/// 语法：`[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`，
/// 或带符号的 `inf` / `infinity` / `nan`。十六进制形式由 [`hex_prefix`] 处理。
fn float_prefix_len(b: &[u8]) -> usize {
    let mut i = 0;
    if matches!(b.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    if let Some(n) = special_len(&b[i..]) {
        return i + n;
    }

    let int_end = digits_from(b, i);
    let mut mantissa_digits = int_end - i;
    i = int_end;

    if b.get(i) == Some(&b'.') {
        let frac_end = digits_from(b, i + 1);
        let frac_digits = frac_end - (i + 1);
        if mantissa_digits + frac_digits > 0 {
            mantissa_digits += frac_digits;
            i = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return 0;
    }

    // 指数部分必须至少带一位数字，否则 `e` 不属于该数字
    if matches!(b.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(b.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_end = digits_from(b, j);
        if exp_end > j {
            i = exp_end;
        }
    }

    i
}

/// 从字符串开头扫描一个浮点数
///
/// 跳过前导空白后尽可能长地匹配浮点字面量，在第一个无法解析的字符处停止。
///
/// # 返回
///
/// - `Some((value, rest))`：扫描到的值与未消费的剩余部分
/// - `None`：当前位置无法扫描出数字（调用方应视为"未前进"）
///
/// 支持十六进制浮点（`0x1p3` → 8）与 `nan(...)` 形式。
pub fn scan_f32(s: &str) -> Option<(f32, &str)> {
    let trimmed = s.trim_start_matches(is_c_space);
    let bytes = trimmed.as_bytes();

    let sign_len = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if let Some((magnitude, len)) = hex_prefix(&bytes[sign_len..]) {
        let value = if bytes.first() == Some(&b'-') {
            -magnitude
        } else {
            magnitude
        };
        return Some((value as f32, &trimmed[sign_len + len..]));
    }

    let len = float_prefix_len(bytes);
    if len == 0 {
        return None;
    }

    // 前缀只包含 ASCII，切分一定落在字符边界上
    let (literal, rest) = trimmed.split_at(len);
    // `nan(...)` 的载荷不影响取值
    let literal = literal.split_once('(').map_or(literal, |(head, _)| head);
    literal.parse::<f32>().ok().map(|v| (v, rest))
}

/// 解析关键帧列表
///
/// 反复扫描浮点数直到无法继续，返回已累积的序列（可能为空）。
/// 顺序即关键帧采样顺序。
///
/// 输入: `"0.1 0.5 1.0"`
/// 输出: `[0.1, 0.5, 1.0]`
pub fn parse_key_list(src: &str) -> Vec<f32> {
    let mut keys = Vec::new();
    let mut rest = src;
    while let Some((value, next)) = scan_f32(rest) {
        keys.push(value);
        rest = next;
    }
    keys
}

/// 整数布尔字段：非零即真
pub fn flag(value: i32) -> bool {
    value != 0
}
