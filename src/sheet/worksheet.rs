// ==========================================
// 内存工作表
// ==========================================
// 职责: 上传文件的值视图（只读取活动工作表的单元格值）
// 来源: xlsx 走 umya-spreadsheet（识别活动工作表）；xls / ods 回退 calamine 第一个工作表
// 坐标: 列、行均为 1 起始
// ==========================================

use crate::sheet::cell::CellValue;
use crate::sheet::error::{SheetError, SheetResult};
use crate::sheet::template::TemplateWorkbook;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// xlsx 最大列数
const MAX_COLUMNS: u32 = 16_384;
/// xlsx 最大行数
const MAX_ROWS: u32 = 1_048_576;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Worksheet {
    name: String,
    // key: (row, col)，按行有序
    cells: BTreeMap<(u32, u32), CellValue>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ==========================================
    // 加载
    // ==========================================

    /// 从文件加载活动工作表（xlsx / xls / ods）
    pub fn load_path<P: AsRef<Path>>(path: P) -> SheetResult<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::load_bytes(&bytes)
    }

    /// 从内存字节加载活动工作表
    pub fn load_bytes(bytes: &[u8]) -> SheetResult<Self> {
        let sheet = match TemplateWorkbook::load_bytes(bytes) {
            Ok(workbook) => workbook.active_values(),
            Err(err) => {
                debug!(error = %err, "非 xlsx，回退 calamine");
                Self::load_first_sheet(bytes)?
            }
        };

        debug!(
            sheet = %sheet.name,
            cells = sheet.cells.len(),
            highest_row = sheet.highest_row(),
            "工作表加载完成"
        );
        Ok(sheet)
    }

    /// xls / ods 没有活动工作表信息，取第一个工作表
    fn load_first_sheet(bytes: &[u8]) -> SheetResult<Self> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(SheetError::NoWorksheet)?;

        let range = workbook.worksheet_range(&sheet_name)?;
        let (start_row, start_col) = range.start().unwrap_or((0, 0));

        let mut sheet = Worksheet::new(sheet_name);
        for (r, c, data) in range.used_cells() {
            let value = cell_from_data(data);
            if value.is_empty() {
                continue;
            }
            let row = start_row + r as u32 + 1;
            let col = start_col + c as u32 + 1;
            sheet.cells.insert((row, col), value);
        }
        Ok(sheet)
    }

    // ==========================================
    // 读写
    // ==========================================

    pub fn set_cell(&mut self, col: u32, row: u32, value: impl Into<CellValue>) -> SheetResult<()> {
        check_coordinate(col, row)?;
        let value = value.into();
        if value.is_empty() {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), value);
        }
        Ok(())
    }

    pub fn cell(&self, col: u32, row: u32) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.cells.get(&(row, col)).unwrap_or(&EMPTY)
    }

    /// 单元格文本（已 trim）
    pub fn cell_text(&self, col: u32, row: u32) -> String {
        self.cell(col, row).trimmed()
    }

    /// 最后一个有值的行号；空表返回 0
    pub fn highest_row(&self) -> u32 {
        self.cells.keys().next_back().map(|(row, _)| *row).unwrap_or(0)
    }
}

pub(crate) fn check_coordinate(col: u32, row: u32) -> SheetResult<()> {
    if col == 0 || row == 0 || col > MAX_COLUMNS || row > MAX_ROWS {
        return Err(SheetError::CellOutOfRange { col, row });
    }
    Ok(())
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        other => CellValue::Text(other.to_string()),
    }
}
