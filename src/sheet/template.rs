// ==========================================
// 平台模板工作簿
// ==========================================
// 职责: 模板原样加载 → 向活动工作表写入数据行 → 序列化为 xlsx
// 红线: 只改写数据单元格；其余工作表、样式、合并区域原样保留
// 坐标: 列、行均为 1 起始
// ==========================================

use crate::sheet::cell::CellValue;
use crate::sheet::error::{SheetError, SheetResult};
use crate::sheet::worksheet::{check_coordinate, Worksheet};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;
use umya_spreadsheet::Spreadsheet;

pub struct TemplateWorkbook {
    book: Spreadsheet,
}

impl TemplateWorkbook {
    /// 空白工作簿（单个 Sheet1）
    pub fn new() -> Self {
        Self {
            book: umya_spreadsheet::new_file(),
        }
    }

    pub fn load_path<P: AsRef<Path>>(path: P) -> SheetResult<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::load_bytes(&bytes)
    }

    /// 仅支持 xlsx
    pub fn load_bytes(bytes: &[u8]) -> SheetResult<Self> {
        let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes.to_vec()), true)
            .map_err(|e| SheetError::ExcelParseError(e.to_string()))?;
        if book.get_sheet_collection().is_empty() {
            return Err(SheetError::NoWorksheet);
        }

        let workbook = Self { book };
        debug!(
            sheets = ?workbook.sheet_names(),
            active = %workbook.active_sheet_name(),
            "模板工作簿加载完成"
        );
        Ok(workbook)
    }

    pub fn active_sheet_name(&self) -> &str {
        self.book.get_active_sheet().get_name()
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.book
            .get_sheet_collection()
            .iter()
            .map(|sheet| sheet.get_name().to_string())
            .collect()
    }

    /// 从第 1 列开始向活动工作表写入一整行
    pub fn write_row(&mut self, row: u32, values: &[CellValue]) -> SheetResult<()> {
        for (idx, value) in values.iter().enumerate() {
            self.set_cell(idx as u32 + 1, row, value)?;
        }
        Ok(())
    }

    /// 写入活动工作表单元格
    ///
    /// 空值只清除已存在的单元格，不新建单元格（保留模板样式）
    pub fn set_cell(&mut self, col: u32, row: u32, value: &CellValue) -> SheetResult<()> {
        check_coordinate(col, row)?;
        let sheet = self.book.get_active_sheet_mut();
        match value {
            CellValue::Text(s) if !s.is_empty() => {
                sheet.get_cell_mut((col, row)).set_value_string(s.as_str());
            }
            CellValue::Number(n) => {
                sheet.get_cell_mut((col, row)).set_value_number(*n);
            }
            _ => {
                if sheet.get_cell((col, row)).is_some() {
                    sheet.get_cell_mut((col, row)).set_value_string("");
                }
            }
        }
        Ok(())
    }

    /// 活动工作表单元格文本（已 trim）
    pub fn cell_text(&self, col: u32, row: u32) -> String {
        self.book
            .get_active_sheet()
            .get_cell((col, row))
            .map(|cell| cell.get_value().trim().to_string())
            .unwrap_or_default()
    }

    pub fn highest_row(&self) -> u32 {
        self.book.get_active_sheet().get_highest_row()
    }

    /// 活动工作表的值快照
    pub fn active_values(&self) -> Worksheet {
        let source = self.book.get_active_sheet();
        let mut sheet = Worksheet::new(source.get_name());
        for cell in source.get_cell_collection() {
            let col: u32 = cell.get_coordinate().get_col_num().to_owned();
            let row: u32 = cell.get_coordinate().get_row_num().to_owned();
            let value = match cell.get_value_number() {
                Some(n) => CellValue::Number(n),
                None => CellValue::Text(cell.get_value().to_string()),
            };
            // 越界坐标不会出现在合法 xlsx 中
            let _ = sheet.set_cell(col, row, value);
        }
        sheet
    }

    pub fn to_xlsx_bytes(&self) -> SheetResult<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        umya_spreadsheet::writer::xlsx::write_writer(&self.book, &mut buffer)
            .map_err(|e| SheetError::ExcelWriteError(e.to_string()))?;
        Ok(buffer.into_inner())
    }

    /// 底层工作簿（样式、合并区域等只读检查）
    pub fn book(&self) -> &Spreadsheet {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut Spreadsheet {
        &mut self.book
    }
}

impl Default for TemplateWorkbook {
    fn default() -> Self {
        Self::new()
    }
}
