use crate::error::{AppError, AppResult};
use crate::models::RawEntry;
use tracing::{debug, trace};

/// The raw field values for one budgeting pass, split by section. This is
/// the input-provider boundary: amounts and frequencies are still text and
/// are validated later by the engine.
#[derive(Debug, Default, Clone)]
pub struct EntrySheet {
    pub income: Vec<RawEntry>,
    pub expenses: Vec<RawEntry>,
}

/// Parse an entries file: CSV with headers `section,label,amount,frequency`.
/// `section` is `income` or `expense` (case-insensitive); an empty frequency
/// cell means Monthly. Structural problems are collected per row and
/// reported together, and nothing is returned in that case.
pub fn parse_entry_file(content: &[u8]) -> AppResult<EntrySheet> {
    trace!(content_size = content.len(), "Parsing entries file");

    let content_str =
        std::str::from_utf8(content).map_err(|e| AppError::EntryFile(e.to_string()))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content_str.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::EntryFile(e.to_string()))?
        .clone();

    let section_col = find_column(&headers, "section")
        .ok_or_else(|| AppError::EntryFile("missing 'section' column".into()))?;
    let label_col = find_column(&headers, "label")
        .ok_or_else(|| AppError::EntryFile("missing 'label' column".into()))?;
    let amount_col = find_column(&headers, "amount")
        .ok_or_else(|| AppError::EntryFile("missing 'amount' column".into()))?;
    let frequency_col = find_column(&headers, "frequency");

    let mut sheet = EntrySheet::default();
    let mut errors: Vec<String> = Vec::new();

    for (i, record) in reader.records().enumerate() {
        let row_number = i + 2; // 1-based, after the header row
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                errors.push(format!("row {}: {}", row_number, e));
                continue;
            }
        };

        let field = |col: usize| record.get(col).unwrap_or("").to_string();
        let section = field(section_col);
        let label = field(label_col);
        if label.is_empty() {
            errors.push(format!("row {}: empty label", row_number));
            continue;
        }

        let entry = RawEntry {
            label,
            amount: field(amount_col),
            frequency: frequency_col.map(field).unwrap_or_default(),
        };

        match section.to_lowercase().as_str() {
            "income" => sheet.income.push(entry),
            "expense" | "expenses" => sheet.expenses.push(entry),
            other => errors.push(format!("row {}: unknown section '{}'", row_number, other)),
        }
    }

    if !errors.is_empty() {
        return Err(AppError::EntryFile(errors.join("; ")));
    }

    debug!(
        income = sheet.income.len(),
        expenses = sheet.expenses.len(),
        "Parsed entries file"
    );
    Ok(sheet)
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_sections() {
        let content = b"section,label,amount,frequency\n\
                        income,Total Salary,3000,Monthly\n\
                        income,Earned Income & Pension,500,Monthly\n\
                        expense,Rent,950,Monthly\n\
                        expense,Tax,100,Yearly\n";
        let sheet = parse_entry_file(content).unwrap();
        assert_eq!(sheet.income.len(), 2);
        assert_eq!(sheet.expenses.len(), 2);
        assert_eq!(sheet.expenses[1].frequency, "Yearly");
    }

    #[test]
    fn empty_frequency_cell_is_allowed() {
        let content = b"section,label,amount,frequency\nexpense,Bills,40,\n";
        let sheet = parse_entry_file(content).unwrap();
        assert_eq!(sheet.expenses[0].frequency, "");
    }

    #[test]
    fn frequency_column_is_optional() {
        let content = b"section,label,amount\nexpense,Bills,40\n";
        let sheet = parse_entry_file(content).unwrap();
        assert_eq!(sheet.expenses[0].frequency, "");
    }

    #[test]
    fn headers_are_case_insensitive() {
        let content = b"Section,Label,Amount,Frequency\nExpense,Rent,950,Monthly\n";
        let sheet = parse_entry_file(content).unwrap();
        assert_eq!(sheet.expenses.len(), 1);
    }

    #[test]
    fn unknown_section_is_reported_with_row_number() {
        let content = b"section,label,amount,frequency\nsavings,Rent,950,Monthly\n";
        let err = parse_entry_file(content).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("row 2"), "{message}");
        assert!(message.contains("savings"), "{message}");
    }

    #[test]
    fn missing_required_column_fails() {
        let content = b"label,amount\nRent,950\n";
        assert!(parse_entry_file(content).is_err());
    }

    #[test]
    fn all_row_errors_are_collected() {
        let content = b"section,label,amount,frequency\n\
                        savings,Rent,950,Monthly\n\
                        expense,,10,Monthly\n";
        let err = parse_entry_file(content).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("row 2") && message.contains("row 3"), "{message}");
    }
}
