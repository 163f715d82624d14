// ==========================================
// ERP 产品目录 - 文件解析器实现
// ==========================================
// 格式: 逗号分隔、UTF-8、首行为表头（大小写敏感，顺序无关）
// 输出: 惰性行流；行级问题以 Err(RowIssue) 形式逐行产出
// ==========================================

use crate::domain::import::{RowIssue, RowIssueKind};
use crate::domain::product::{ProductField, RawProductRow};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::product_importer_trait::{FileParser, RowStream};
use csv::{ByteRecord, Reader, ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

const UTF8_BOM: char = '\u{feff}';

/// 校验文件名扩展名为 .csv（大小写不敏感）
///
/// 扩展名取最后一个 `.` 之后的文本，`.csv` 这样的文件名同样接受
pub fn check_csv_extension(file_name: &str) -> ImportResult<()> {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(file_name);
    let ext = base.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
    if ext.eq_ignore_ascii_case("csv") {
        Ok(())
    } else if ext.is_empty() {
        Err(ImportError::UnsupportedFormat(file_name.to_string()))
    } else {
        Err(ImportError::UnsupportedFormat(ext.to_string()))
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvParser;

impl CsvParser {
    pub fn new() -> Self {
        Self
    }

    fn build_stream<R: Read + Send + 'static>(reader: R) -> ImportResult<RowStream> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(b',')
            .flexible(true) // 列数不一致由行级校验处理
            .from_reader(reader);

        let headers: Vec<String> = reader
            .byte_headers()?
            .iter()
            .map(|h| {
                String::from_utf8_lossy(h)
                    .trim_start_matches(UTF8_BOM)
                    .trim()
                    .to_string()
            })
            .collect();

        // 没有表头：空流
        if headers.iter().all(|h| h.is_empty()) {
            debug!("输入无表头，按 0 行处理");
            return Ok(Box::new(std::iter::empty()));
        }

        let key_header = ProductField::PartNumber.header();
        if !headers.iter().any(|h| h == key_header) {
            return Err(ImportError::MissingRequiredHeader(key_header.to_string()));
        }

        for field in ProductField::ALL {
            if !headers.iter().any(|h| h == field.header()) {
                warn!(header = field.header(), "表头缺失，该列按空值处理");
            }
        }

        Ok(Box::new(CsvRowIter {
            reader,
            headers,
            record: ByteRecord::new(),
            finished: false,
        }))
    }
}

impl FileParser for CsvParser {
    fn open_rows(&self, file_path: &Path) -> ImportResult<RowStream> {
        check_csv_extension(&file_path.to_string_lossy())?;

        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let file = File::open(file_path)
            .map_err(|e| ImportError::FileReadError(format!("{}: {}", file_path.display(), e)))?;
        Self::build_stream(file)
    }

    fn parse_reader(&self, reader: Box<dyn Read + Send>) -> ImportResult<RowStream> {
        Self::build_stream(reader)
    }
}

// ==========================================
// CsvRowIter - 行流
// ==========================================
struct CsvRowIter<R> {
    reader: Reader<R>,
    headers: Vec<String>,
    record: ByteRecord,
    finished: bool,
}

impl<R: Read> CsvRowIter<R> {
    fn is_empty_row(record: &ByteRecord) -> bool {
        record.is_empty() || (record.len() == 1 && record.get(0).map_or(false, |f| f.is_empty()))
    }

    fn current_line(&self) -> usize {
        self.record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(0)
    }
}

impl<R: Read> Iterator for CsvRowIter<R> {
    type Item = Result<RawProductRow, RowIssue>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished {
                return None;
            }

            match self.reader.read_byte_record(&mut self.record) {
                Ok(true) => {}
                Ok(false) => {
                    self.finished = true;
                    return None;
                }
                Err(err) => {
                    let row_number = err.position().map(|p| p.line() as usize).unwrap_or(0);
                    if err.is_io_error() {
                        // 读取中断：产出一条问题后结束
                        self.finished = true;
                    }
                    return Some(Err(RowIssue::new(
                        row_number,
                        RowIssueKind::MalformedRow,
                        err.to_string(),
                    )));
                }
            }

            if Self::is_empty_row(&self.record) {
                continue;
            }

            let row_number = self.current_line();
            if self.record.len() != self.headers.len() {
                return Some(Err(RowIssue::new(
                    row_number,
                    RowIssueKind::ColumnCountMismatch {
                        expected: self.headers.len(),
                        actual: self.record.len(),
                    },
                    format!(
                        "列数 {} 与表头列数 {} 不一致",
                        self.record.len(),
                        self.headers.len()
                    ),
                )));
            }

            let record = match StringRecord::from_byte_record(self.record.clone()) {
                Ok(record) => record,
                Err(e) => {
                    return Some(Err(RowIssue::new(
                        row_number,
                        RowIssueKind::MalformedRow,
                        e.to_string(),
                    )))
                }
            };

            let fields: HashMap<String, String> = self
                .headers
                .iter()
                .cloned()
                .zip(record.iter().map(str::to_string))
                .collect();

            return Some(Ok(RawProductRow { row_number, fields }));
        }
    }
}
