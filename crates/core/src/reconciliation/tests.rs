//! Unit tests for sheet mapping and the reconciliation service.

use calamine::Data;
use chrono::NaiveDate;
use rstest::rstest;
use rust_xlsxwriter::Workbook;

use super::sheet::headers;
use super::*;

const ALL_HEADERS: [&str; 9] = [
    headers::COLLECTIVE,
    headers::BANK,
    headers::ACCOUNT,
    headers::WITHDRAWALS_BANK_NOT_ACCOUNTING,
    headers::DEPOSITS_ACCOUNTING_NOT_BANK,
    headers::DEPOSITS_BANK_NOT_ACCOUNTING,
    headers::ACCOUNTING_BALANCE,
    headers::RECONCILED_BALANCE,
    headers::ACCOUNT_TYPE,
];

fn header(names: &[&str]) -> Vec<Data> {
    names.iter().map(|n| Data::String((*n).to_string())).collect()
}

fn text(s: &str) -> Data {
    Data::String(s.to_string())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Build an xlsx workbook in memory. `None` cells are left unwritten.
fn xlsx(headers: &[&str], rows: &[Vec<Option<Data>>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, name) in headers.iter().enumerate() {
        sheet
            .write_string(0, u16::try_from(col).unwrap(), *name)
            .unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        let r = u32::try_from(r + 1).unwrap();
        for (c, cell) in row.iter().enumerate() {
            let c = u16::try_from(c).unwrap();
            match cell {
                Some(Data::String(s)) => {
                    sheet.write_string(r, c, s.as_str()).unwrap();
                }
                Some(Data::Float(f)) => {
                    sheet.write_number(r, c, *f).unwrap();
                }
                Some(other) => panic!("unsupported test cell {other:?}"),
                None => {}
            }
        }
    }
    workbook.save_to_buffer().unwrap()
}

// =========================================================================
// SheetLayout
// =========================================================================

#[test]
fn test_layout_requires_collective() {
    let result = SheetLayout::from_header(&header(&[headers::BANK, headers::ACCOUNT]));
    assert!(matches!(
        result,
        Err(IngestError::MissingColumn(headers::COLLECTIVE))
    ));
}

#[test]
fn test_layout_headers_are_exact() {
    let result = SheetLayout::from_header(&header(&["colectiva"]));
    assert!(matches!(result, Err(IngestError::MissingColumn(_))));
}

#[test]
fn test_full_row_maps_every_field() {
    let layout = SheetLayout::from_header(&header(&ALL_HEADERS)).unwrap();
    let row = vec![
        Data::Float(100.0),
        text("Banco Nacional"),
        Data::Float(1_234_567.0),
        Data::Float(10.5),
        Data::Float(20.0),
        Data::Int(30),
        Data::Float(5000.25),
        Data::Float(4990.0),
        text("Corriente"),
    ];

    let mapped = layout.map_row(&row, 2).unwrap().expect("row has content");

    assert_eq!(
        mapped,
        ReconciliationRow {
            collective: "100".to_string(),
            bank: Some("Banco Nacional".to_string()),
            account: Some("1234567".to_string()),
            withdrawals_bank_not_accounting: Some(10.5),
            deposits_accounting_not_bank: Some(20.0),
            deposits_bank_not_accounting: Some(30.0),
            accounting_balance: Some(5000.25),
            reconciled_balance: Some(4990.0),
            account_type: Some("Corriente".to_string()),
        }
    );
}

#[test]
fn test_header_order_does_not_matter() {
    let layout = SheetLayout::from_header(&header(&[
        headers::ACCOUNTING_BALANCE,
        headers::COLLECTIVE,
    ]))
    .unwrap();

    let mapped = layout
        .map_row(&[Data::Float(7.0), text("A1")], 2)
        .unwrap()
        .unwrap();

    assert_eq!(mapped.collective, "A1");
    assert_eq!(mapped.accounting_balance, Some(7.0));
}

#[test]
fn test_absent_numeric_columns_default_to_zero() {
    let layout = SheetLayout::from_header(&header(&[headers::COLLECTIVE])).unwrap();

    let mapped = layout.map_row(&[text("100")], 2).unwrap().unwrap();

    assert_eq!(mapped.withdrawals_bank_not_accounting, Some(0.0));
    assert_eq!(mapped.deposits_accounting_not_bank, Some(0.0));
    assert_eq!(mapped.deposits_bank_not_accounting, Some(0.0));
    assert_eq!(mapped.accounting_balance, Some(0.0));
    assert_eq!(mapped.reconciled_balance, Some(0.0));
}

#[test]
fn test_absent_text_columns_are_null_not_literal() {
    let layout = SheetLayout::from_header(&header(&[headers::COLLECTIVE])).unwrap();

    let mapped = layout.map_row(&[text("100")], 2).unwrap().unwrap();

    assert_eq!(mapped.bank, None);
    assert_eq!(mapped.account, None);
    assert_eq!(mapped.account_type, None);
}

#[test]
fn test_empty_numeric_cell_is_null_not_zero() {
    let layout = SheetLayout::from_header(&header(&[
        headers::COLLECTIVE,
        headers::WITHDRAWALS_BANK_NOT_ACCOUNTING,
    ]))
    .unwrap();

    let mapped = layout
        .map_row(&[text("100"), Data::Empty], 2)
        .unwrap()
        .unwrap();

    assert_eq!(mapped.withdrawals_bank_not_accounting, None);
}

#[test]
fn test_blank_row_is_skipped() {
    let layout = SheetLayout::from_header(&header(&ALL_HEADERS)).unwrap();
    let row = vec![Data::Empty, text("  "), Data::Empty];

    assert_eq!(layout.map_row(&row, 5).unwrap(), None);
}

#[test]
fn test_missing_collective_is_rejected() {
    let layout = SheetLayout::from_header(&header(&[
        headers::COLLECTIVE,
        headers::BANK,
    ]))
    .unwrap();

    let result = layout.map_row(&[Data::Empty, text("Banco")], 4);

    assert!(matches!(result, Err(IngestError::MissingCollective { row: 4 })));
}

#[rstest]
#[case(Data::Float(12.5), Some(12.5))]
#[case(Data::Int(-3), Some(-3.0))]
#[case(text(" 1500.75 "), Some(1500.75))]
#[case(text(""), None)]
#[case(Data::Empty, None)]
#[case(Data::Bool(true), Some(1.0))]
fn test_numeric_cell_coercion(#[case] cell: Data, #[case] expected: Option<f64>) {
    let layout = SheetLayout::from_header(&header(&[
        headers::COLLECTIVE,
        headers::RECONCILED_BALANCE,
    ]))
    .unwrap();

    let mapped = layout.map_row(&[text("9"), cell], 2).unwrap().unwrap();

    assert_eq!(mapped.reconciled_balance, expected);
}

#[rstest]
#[case("n/a")]
#[case("inf")]
#[case("-Infinity")]
#[case("NaN")]
fn test_non_numeric_text_is_rejected(#[case] value: &str) {
    let layout = SheetLayout::from_header(&header(&[
        headers::COLLECTIVE,
        headers::RECONCILED_BALANCE,
    ]))
    .unwrap();

    let err = layout
        .map_row(&[text("9"), text(value)], 3)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        format!("row 3: 'Saldo Conciliado' is not a number: {value}")
    );
}

#[rstest]
#[case(Data::Float(100.0), "100")]
#[case(Data::Float(100.5), "100.5")]
#[case(Data::Int(42), "42")]
#[case(text("  007 "), "007")]
fn test_collective_text_coercion(#[case] cell: Data, #[case] expected: &str) {
    let layout = SheetLayout::from_header(&header(&[headers::COLLECTIVE])).unwrap();

    let mapped = layout.map_row(&[cell], 2).unwrap().unwrap();

    assert_eq!(mapped.collective, expected);
}

// =========================================================================
// Workbook reading
// =========================================================================

#[test]
fn test_read_workbook_maps_rows_in_order() {
    let bytes = xlsx(
        &[headers::COLLECTIVE, headers::ACCOUNTING_BALANCE, headers::RECONCILED_BALANCE],
        &[
            vec![Some(Data::Float(100.0)), Some(Data::Float(10.0)), Some(Data::Float(9.0))],
            vec![],
            vec![Some(text("200")), None, Some(Data::Float(3.5))],
        ],
    );

    let rows = read_workbook(&bytes).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].collective, "100");
    assert_eq!(rows[0].accounting_balance, Some(10.0));
    assert_eq!(rows[1].collective, "200");
    assert_eq!(rows[1].accounting_balance, None);
    assert_eq!(rows[1].reconciled_balance, Some(3.5));
    // Absent from the sheet.
    assert_eq!(rows[1].withdrawals_bank_not_accounting, Some(0.0));
}

#[test]
fn test_read_workbook_reports_sheet_row_numbers() {
    let bytes = xlsx(
        &[headers::COLLECTIVE, headers::ACCOUNTING_BALANCE],
        &[
            vec![Some(text("1")), Some(Data::Float(1.0))],
            vec![Some(text("2")), Some(text("mucho"))],
        ],
    );

    let err = read_workbook(&bytes).unwrap_err();

    assert!(matches!(err, IngestError::InvalidNumber { row: 3, .. }));
}

#[test]
fn test_read_workbook_empty_sheet_yields_no_rows() {
    let mut workbook = Workbook::new();
    workbook.add_worksheet();
    let bytes = workbook.save_to_buffer().unwrap();

    let rows = read_workbook(&bytes).unwrap();

    assert!(rows.is_empty());
}

#[test]
fn test_read_workbook_rejects_non_spreadsheets() {
    let err = read_workbook(b"Colectiva,Banco\n100,BN\n").unwrap_err();
    assert!(matches!(err, IngestError::Workbook(_)));
}

#[test]
fn test_read_workbook_without_collective_header() {
    let bytes = xlsx(&[headers::BANK], &[vec![Some(text("Banco"))]]);

    let err = read_workbook(&bytes).unwrap_err();

    assert!(matches!(err, IngestError::MissingColumn(headers::COLLECTIVE)));
}

// =========================================================================
// ReconciliationService
// =========================================================================

#[test]
fn test_parse_upload_checks_month_first() {
    let err = ReconciliationService::parse_upload("09/2025", b"not a workbook").unwrap_err();
    assert!(matches!(err, IngestError::InvalidMonth(_)));
}

#[test]
fn test_parse_upload() {
    let bytes = xlsx(&[headers::COLLECTIVE], &[vec![Some(text("100"))]]);

    let upload = ReconciliationService::parse_upload("2025-09", &bytes).unwrap();

    assert_eq!(upload.month.first_day(), date(2025, 9, 1));
    assert_eq!(upload.rows.len(), 1);
}

#[test]
fn test_balance_series_keeps_points_parallel() {
    let series = ReconciliationService::balance_series(vec![
        BalancePoint {
            date: date(2025, 1, 1),
            accounting_balance: Some(10.0),
            reconciled_balance: Some(9.0),
        },
        BalancePoint {
            date: date(2025, 2, 1),
            accounting_balance: None,
            reconciled_balance: Some(11.0),
        },
    ]);

    assert_eq!(series.len(), 2);
    assert_eq!(series.labels, vec![date(2025, 1, 1), date(2025, 2, 1)]);
    assert_eq!(series.accounting, vec![Some(10.0), None]);
    assert_eq!(series.reconciled, vec![Some(9.0), Some(11.0)]);
}

#[test]
fn test_balance_series_empty() {
    let series = ReconciliationService::balance_series(Vec::new());
    assert!(series.is_empty());
    assert!(series.accounting.is_empty());
    assert!(series.reconciled.is_empty());
}

#[test]
fn test_ingest_error_becomes_processing_error() {
    let app: conciliacion_shared::AppError = IngestError::NoWorksheet.into();
    assert_eq!(app.status_code(), 500);
    assert_eq!(
        app.to_string(),
        "Error al procesar el archivo: spreadsheet has no worksheets"
    );
}
