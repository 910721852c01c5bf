//! Payslip page layout.
//!
//! Places the header, employee panel, salary breakdown table and footer of a
//! single A4 page as [`DrawPrimitive`]s. Layout is pure: the same content,
//! verification bitmap, text and timestamp always produce the same primitives.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::warn;

use crate::config::DocumentText;
use crate::models::{CompanyInfo, EmployeeInfo, PayrollInput, PayrollTotals};
use crate::verification::Bitmap;

use super::format::{currency_decimal_places, format_money, format_percentage};
use super::primitives::{
    DocumentLayout, DrawPrimitive, Font, ImagePlacement, PageSize, RasterImage, Rect, Rgb, TextRun,
};

const MARGIN: f32 = 20.0;
const INSET: f32 = 25.0;

const HEADER_HEIGHT: f32 = 40.0;
const COMPANY_NAME_Y: f32 = 25.0;
const COMPANY_ADDRESS_Y: f32 = 32.0;
const VERIFICATION_SIZE: f32 = 30.0;
const VERIFICATION_TOP: f32 = 5.0;
const LOGO_SIZE: f32 = 30.0;
const LOGO_GAP: f32 = 5.0;

const TITLE_Y: f32 = 55.0;
const DATE_Y: f32 = 63.0;

const PANEL_TOP: f32 = 70.0;
const PANEL_HEADING_OFFSET: f32 = 10.0;
const PANEL_FIRST_LINE_OFFSET: f32 = 18.0;
const PANEL_BOTTOM_PADDING: f32 = 4.0;
const PANEL_MIN_HEIGHT: f32 = 46.0;
const LINE_PITCH: f32 = 6.0;

const TABLE_GAP: f32 = 8.0;
const BAR_HEIGHT: f32 = 10.0;
const BAR_BASELINE_OFFSET: f32 = 7.0;
const ROW_PITCH: f32 = 6.0;
const SECTION_GAP: f32 = 10.0;
const AMOUNT_INSET: f32 = 60.0;
const DEDUCTION_INDENT: f32 = 5.0;

const NET_BAND_HEIGHT: f32 = 11.0;
const NET_BASELINE_OFFSET: f32 = 7.5;
const NET_AMOUNT_INSET: f32 = 80.0;

const FOOTER_OFFSET: f32 = 40.0;
const FOOTER_PITCH: f32 = 6.0;
const FOOTER_CLEARANCE: f32 = 4.0;

const HEADER_FILL: Rgb = Rgb(31, 41, 55);
const PANEL_FILL: Rgb = Rgb(249, 250, 251);
const BAR_FILL: Rgb = Rgb(59, 130, 246);
const NET_FILL: Rgb = Rgb(34, 197, 94);
const BODY_INK: Rgb = Rgb(17, 24, 39);
const FOOTER_INK: Rgb = Rgb(107, 114, 128);

/// Everything printed in the body of a payslip.
#[derive(Debug, Clone, Copy)]
pub struct PayslipContent<'a> {
    /// Normalised payroll input; supplies the line items and tax percentage.
    pub input: &'a PayrollInput,
    /// Totals computed from `input`.
    pub totals: &'a PayrollTotals,
    /// The employee being paid.
    pub employee: &'a EmployeeInfo,
    /// The paying company.
    pub company: &'a CompanyInfo,
}

/// Lays out a payslip page.
///
/// Rows in the salary breakdown appear in a fixed order: basic salary,
/// overtime, one row per allowance, one row per bonus, gross pay, a
/// `Deductions:` heading, one row per deduction (shown negated), the tax row
/// and the net pay band. Line items keep their input order.
///
/// The page is never split. If the table runs into the footer area the result
/// reports [`DocumentLayout::overflows`] and a warning is logged.
pub fn layout_payslip(
    content: &PayslipContent<'_>,
    verification: Bitmap,
    text: &DocumentText,
    generated_at: DateTime<Utc>,
) -> DocumentLayout {
    let page = PageSize::A4;
    let content_width = page.width - 2.0 * MARGIN;
    let money = MoneyStyle::for_company(content.company, text.show_currency_code);
    let mut canvas = Canvas::default();

    // Header band
    canvas.fill(Rect::new(0.0, 0.0, page.width, HEADER_HEIGHT), HEADER_FILL);
    canvas.text(
        &content.company.company_name,
        MARGIN,
        COMPANY_NAME_Y,
        Font::BOLD,
        24.0,
        Rgb::WHITE,
    );
    canvas.text(
        single_line(&content.company.company_address),
        MARGIN,
        COMPANY_ADDRESS_Y,
        Font::REGULAR,
        10.0,
        Rgb::WHITE,
    );
    canvas.image(
        Rect::new(
            page.width - VERIFICATION_SIZE - MARGIN,
            VERIFICATION_TOP,
            VERIFICATION_SIZE,
            VERIFICATION_SIZE,
        ),
        RasterImage::Bitmap(verification),
    );
    match content.company.inline_logo_png() {
        Some(png) => canvas.image(
            Rect::new(
                page.width - MARGIN - VERIFICATION_SIZE - LOGO_GAP - LOGO_SIZE,
                VERIFICATION_TOP,
                LOGO_SIZE,
                LOGO_SIZE,
            ),
            RasterImage::Encoded(png),
        ),
        None if content.company.company_logo_url.is_some() => {
            warn!(
                company = %content.company.company_name,
                "Company logo is not an inline PNG data URL; skipped"
            );
        }
        None => {}
    }

    canvas.text(&text.title, MARGIN, TITLE_Y, Font::BOLD, 20.0, HEADER_FILL);
    canvas.text(
        format!("Payment Date: {}", content.input.payment_date.format("%Y-%m-%d")),
        MARGIN,
        DATE_Y,
        Font::REGULAR,
        12.0,
        BODY_INK,
    );

    // Employee panel
    let identity = content.employee.identity_lines();
    let banking = content.employee.banking_lines();
    let panel_height = panel_height(identity.len().max(banking.len()));
    canvas.fill(
        Rect::new(MARGIN, PANEL_TOP, content_width, panel_height),
        PANEL_FILL,
    );
    canvas.text(
        "Employee Information",
        INSET,
        PANEL_TOP + PANEL_HEADING_OFFSET,
        Font::BOLD,
        14.0,
        BODY_INK,
    );
    let first_line = PANEL_TOP + PANEL_FIRST_LINE_OFFSET;
    for (index, line) in identity.into_iter().enumerate() {
        let y = first_line + index as f32 * LINE_PITCH;
        canvas.text(line, INSET, y, Font::REGULAR, 10.0, BODY_INK);
    }
    let right_column = page.width / 2.0 + 10.0;
    for (index, line) in banking.into_iter().enumerate() {
        let y = first_line + index as f32 * LINE_PITCH;
        canvas.text(line, right_column, y, Font::REGULAR, 10.0, BODY_INK);
    }

    // Salary breakdown
    let table_top = PANEL_TOP + panel_height + TABLE_GAP;
    canvas.fill(
        Rect::new(MARGIN, table_top, content_width, BAR_HEIGHT),
        BAR_FILL,
    );
    canvas.text(
        "Salary Breakdown",
        INSET,
        table_top + BAR_BASELINE_OFFSET,
        Font::BOLD,
        12.0,
        Rgb::WHITE,
    );

    let amount_x = page.width - AMOUNT_INSET;
    let mut y = table_top + BAR_HEIGHT + BAR_BASELINE_OFFSET;

    let (totals, input) = (content.totals, content.input);
    let entry = |label: String, amount: Decimal| (label, money.format(amount));

    let mut earnings = vec![
        entry("Basic Salary".to_string(), input.basic_salary),
        entry("Overtime".to_string(), totals.overtime_pay),
    ];
    for item in &input.allowances {
        earnings.push(entry(format!("{} Allowance", capitalize(&item.label)), item.amount));
    }
    for item in &input.bonuses {
        earnings.push(entry(format!("{} Bonus", capitalize(&item.label)), item.amount));
    }
    for (label, amount) in earnings {
        canvas.row(label, amount, INSET, amount_x, y, Font::REGULAR);
        y += ROW_PITCH;
    }
    let gross = money.format(totals.gross_pay);
    canvas.row("Gross Pay", gross, INSET, amount_x, y, Font::BOLD);
    y += SECTION_GAP;

    canvas.text("Deductions:", INSET, y, Font::BOLD, 10.0, BODY_INK);
    y += ROW_PITCH;
    let mut deductions: Vec<(String, String)> = input
        .deductions
        .iter()
        .map(|item| entry(capitalize(&item.label), -item.amount))
        .collect();
    deductions.push(entry(
        format!("Tax ({})", format_percentage(input.tax_percentage)),
        -totals.tax_amount,
    ));
    let deduction_x = INSET + DEDUCTION_INDENT;
    for (label, amount) in deductions {
        canvas.row(label, amount, deduction_x, amount_x, y, Font::REGULAR);
        y += ROW_PITCH;
    }

    let band_top = y - 2.0;
    canvas.fill(
        Rect::new(MARGIN, band_top, content_width, NET_BAND_HEIGHT),
        NET_FILL,
    );
    let net_baseline = band_top + NET_BASELINE_OFFSET;
    canvas.text("Net Pay", INSET, net_baseline, Font::BOLD, 14.0, Rgb::WHITE);
    canvas.text(
        money.format(totals.net_pay),
        page.width - NET_AMOUNT_INSET,
        net_baseline,
        Font::BOLD,
        14.0,
        Rgb::WHITE,
    );
    let content_bottom = band_top + NET_BAND_HEIGHT;

    // Footer
    let footer_y = page.height - FOOTER_OFFSET;
    let disclaimer = &text.footer_disclaimer;
    canvas.text(disclaimer, MARGIN, footer_y, Font::REGULAR, 8.0, FOOTER_INK);
    canvas.text(
        format!("Generated on {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC")),
        MARGIN,
        footer_y + FOOTER_PITCH,
        Font::REGULAR,
        8.0,
        FOOTER_INK,
    );
    canvas.text(
        &text.attribution,
        MARGIN,
        footer_y + 2.0 * FOOTER_PITCH,
        Font::REGULAR,
        8.0,
        FOOTER_INK,
    );

    let layout = DocumentLayout {
        page,
        title: format!(
            "Payslip {} {}",
            content.employee.employee_id, content.input.payment_date
        ),
        primitives: canvas.primitives,
        content_bottom,
        footer_top: footer_y - FOOTER_CLEARANCE,
    };

    if layout.overflows() {
        warn!(
            employee_id = %content.employee.employee_id,
            content_bottom = layout.content_bottom,
            footer_top = layout.footer_top,
            line_items = content.input.allowances.len()
                + content.input.bonuses.len()
                + content.input.deductions.len(),
            "Payslip content runs into the footer area"
        );
    }

    layout
}

fn panel_height(lines: usize) -> f32 {
    let last_line = lines.saturating_sub(1) as f32 * LINE_PITCH;
    (PANEL_FIRST_LINE_OFFSET + last_line + PANEL_BOTTOM_PADDING).max(PANEL_MIN_HEIGHT)
}

/// Joins a multi-line value into one line.
fn single_line(value: &str) -> String {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn capitalize(label: &str) -> String {
    let label = label.trim();
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

struct MoneyStyle {
    decimal_places: u32,
    label: Option<String>,
}

impl MoneyStyle {
    fn for_company(company: &CompanyInfo, show_currency_code: bool) -> Self {
        let currency = company.currency.trim().to_ascii_uppercase();
        Self {
            decimal_places: currency_decimal_places(&currency),
            label: (show_currency_code && !currency.is_empty()).then_some(currency),
        }
    }

    fn format(&self, amount: Decimal) -> String {
        format_money(amount, self.decimal_places, self.label.as_deref())
    }
}

#[derive(Default)]
struct Canvas {
    primitives: Vec<DrawPrimitive>,
}

impl Canvas {
    fn fill(&mut self, rect: Rect, color: Rgb) {
        self.primitives.push(DrawPrimitive::FilledRect { rect, color });
    }

    fn text(&mut self, text: impl Into<String>, x: f32, y: f32, font: Font, size: f32, color: Rgb) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.primitives.push(DrawPrimitive::Text(TextRun {
            text,
            x,
            y,
            font,
            size,
            color,
        }));
    }

    fn image(&mut self, rect: Rect, image: RasterImage) {
        self.primitives
            .push(DrawPrimitive::Image(ImagePlacement { rect, image }));
    }

    fn row(
        &mut self,
        label: impl Into<String>,
        amount: String,
        label_x: f32,
        amount_x: f32,
        y: f32,
        font: Font,
    ) {
        self.text(label, label_x, y, font, 10.0, BODY_INK);
        self.text(amount, amount_x, y, font, 10.0, BODY_INK);
    }
}
