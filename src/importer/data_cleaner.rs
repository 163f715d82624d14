// ==========================================
// ERP 产品目录 - 数据清洗器实现
// ==========================================
// 职责: 文本清洗，按顺序执行:
//   1. 删除 <script>/<style> 元素（含内容）
//   2. 去标签
//   3. 删除百分号编码八位组（%XX，重复至不再出现）
//   4. 换行与制表符转空格，合并空白，TRIM
// 说明: 所有 7 个字段均按纯文本处理，不做数值校验
// ==========================================

use crate::importer::product_importer_trait::DataCleaner as DataCleanerTrait;

#[derive(Debug, Default, Clone, Copy)]
pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn sanitize_text(&self, value: &str) -> String {
        let stripped = self.strip_tags(&self.strip_script_style(value));
        let decoded = self.remove_percent_octets(&stripped);
        decoded.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

impl DataCleaner {
    /// 删除 `<script ...>...</script>` 与 `<style ...>...</style>`（大小写不敏感）
    ///
    /// 没有闭合标签的开始标签留给 `strip_tags` 处理
    pub fn strip_script_style(&self, value: &str) -> String {
        // ASCII 小写不改变字节偏移
        let lower = value.to_ascii_lowercase();
        let mut out = String::with_capacity(value.len());
        let mut pos = 0;

        while pos < value.len() {
            let next = RAW_TEXT_ELEMENTS
                .iter()
                .filter_map(|name| lower[pos..].find(&format!("<{}", name)).map(|i| (pos + i, *name)))
                .min_by_key(|(i, _)| *i);
            let Some((open_start, name)) = next else {
                break;
            };

            let after_name = open_start + 1 + name.len();
            let Some(gt) = lower[after_name..].find('>') else {
                break;
            };
            let content_start = after_name + gt + 1;
            let close_tag = format!("</{}>", name);

            match lower[content_start..].find(&close_tag) {
                Some(close) => {
                    out.push_str(&value[pos..open_start]);
                    pos = content_start + close + close_tag.len();
                }
                None => {
                    out.push_str(&value[pos..after_name]);
                    pos = after_name;
                }
            }
        }

        out.push_str(&value[pos..]);
        out
    }

    /// 删除 `%XX` 形式的百分号编码（X 为十六进制数字），直到不再出现
    pub fn remove_percent_octets(&self, value: &str) -> String {
        let mut current = value.to_string();
        loop {
            let chars: Vec<char> = current.chars().collect();
            let mut next = String::with_capacity(current.len());
            let mut i = 0;
            while i < chars.len() {
                let is_octet = chars[i] == '%'
                    && i + 2 < chars.len()
                    && chars[i + 1].is_ascii_hexdigit()
                    && chars[i + 2].is_ascii_hexdigit();
                if is_octet {
                    i += 3;
                } else {
                    next.push(chars[i]);
                    i += 1;
                }
            }

            if next.len() == current.len() {
                return next;
            }
            current = next;
        }
    }

    /// 去除 `<...>` 标签
    ///
    /// # 规则
    /// - `<` 后紧跟字母、`/`、`!` 或 `?` 时视为标签开始，删除至 `>`（含）
    /// - 标签未闭合时删除至行尾
    /// - 其他 `<`（如 `a < b`）原样保留
    pub fn strip_tags(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '<' {
                out.push(c);
                continue;
            }

            let opens_tag = matches!(
                chars.peek(),
                Some(next) if next.is_ascii_alphabetic() || matches!(next, '/' | '!' | '?')
            );
            if !opens_tag {
                out.push(c);
                continue;
            }

            for skipped in chars.by_ref() {
                if skipped == '>' {
                    break;
                }
            }
        }

        out
    }
}
