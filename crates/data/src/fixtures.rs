use avenue_core::{
    Avenue, Dataset, DurationCategory, InvestorRecord, ReasonColumn, ReturnCategory, ScoreMap,
};

/// Deterministic demo respondents. Scores follow [`Avenue::ALL`] order and
/// reasons follow [`ReasonColumn::ALL`] order.
const DEMO_ROWS: &[DemoRow] = &[
    DemoRow {
        gender: "Male",
        age: 34,
        duration: DurationCategory::MoreThanFiveYears,
        expect: ReturnCategory::TwentyToThirty,
        scores: [5.0, 6.0, 3.0, 3.5, 4.0, 4.0, 4.0],
        reasons: [Some("Better Returns"), Some("Capital Appreciation"), Some("Assured Returns"), Some("Fixed Returns")],
        source: "Financial Consultants",
    },
    DemoRow {
        gender: "Female",
        age: 29,
        duration: DurationCategory::MoreThanFiveYears,
        expect: ReturnCategory::TwentyToThirty,
        scores: [5.4, 5.6, 3.0, 3.5, 4.0, 3.8, 4.2],
        reasons: [Some("Fund Diversification"), Some("Capital Appreciation"), None, Some("Risk Free")],
        source: "Internet",
    },
    DemoRow {
        gender: "Female",
        age: 41,
        duration: DurationCategory::LessThanOneYear,
        expect: ReturnCategory::TenToTwenty,
        scores: [3.0, 2.0, 4.0, 4.5, 5.0, 4.8, 3.5],
        reasons: [Some("Better Returns"), Some("Dividend"), Some("Safe Investment"), Some("Fixed Returns")],
        source: "Newspapers and Magazines",
    },
    DemoRow {
        gender: "Male",
        age: 52,
        duration: DurationCategory::LessThanOneYear,
        expect: ReturnCategory::TenToTwenty,
        scores: [2.6, 1.8, 4.2, 4.1, 5.2, 5.0, 3.3],
        reasons: [None, None, Some("Safe Investment"), Some("Risk Free")],
        source: "Television",
    },
    DemoRow {
        gender: "Female",
        age: 27,
        duration: DurationCategory::OneToThreeYears,
        expect: ReturnCategory::TwentyToThirty,
        scores: [5.5, 4.5, 2.5, 3.0, 3.5, 3.0, 5.0],
        reasons: [Some("Better Returns"), Some("Liquidity"), Some("Assured Returns"), Some("High Interest Rates")],
        source: "Internet",
    },
    DemoRow {
        gender: "Male",
        age: 38,
        duration: DurationCategory::ThreeToFiveYears,
        expect: ReturnCategory::TenToTwenty,
        scores: [4.5, 3.5, 3.5, 4.5, 4.0, 5.5, 4.0],
        reasons: [Some("Tax Benefits"), Some("Dividend"), Some("Assured Returns"), Some("Risk Free")],
        source: "Financial Consultants",
    },
];

struct DemoRow {
    gender: &'static str,
    age: u32,
    duration: DurationCategory,
    expect: ReturnCategory,
    scores: [f64; 7],
    reasons: [Option<&'static str>; 4],
    source: &'static str,
}

impl DemoRow {
    fn to_record(&self) -> InvestorRecord {
        let mut record = InvestorRecord::new(self.duration, self.expect, ScoreMap::new(self.scores));
        for (column, reason) in ReasonColumn::ALL.into_iter().zip(self.reasons) {
            record.reasons.set(column, reason.map(str::to_string));
        }
        record.gender = Some(self.gender.to_string());
        record.age = Some(self.age);
        record.source = Some(self.source.to_string());
        record
    }
}

/// Six respondents across four segments. No row expects 30%-40%, so those
/// profiles exercise the whole-dataset fallback.
pub fn demo_dataset() -> Dataset {
    Dataset::from_records(DEMO_ROWS.iter().map(DemoRow::to_record).collect())
}

/// [`demo_dataset`] rendered in the survey's CSV layout.
pub fn demo_csv() -> String {
    let mut header = vec!["gender", "age", "Investment_Avenues"];
    header.extend(Avenue::ALL.map(Avenue::column_name));
    header.extend(["Duration", "Expect"]);
    header.extend(ReasonColumn::ALL.map(ReasonColumn::column_name));
    header.push("Source");

    let mut text = header.join(",");
    for row in DEMO_ROWS {
        let mut fields = vec![row.gender.to_string(), row.age.to_string(), "Yes".to_string()];
        fields.extend(row.scores.iter().map(f64::to_string));
        fields.push(row.duration.label().to_string());
        fields.push(row.expect.label().to_string());
        fields.extend(row.reasons.iter().map(|reason| quote(reason.unwrap_or(""))));
        fields.push(quote(row.source));

        text.push('\n');
        text.push_str(&fields.join(","));
    }
    text.push('\n');
    text
}

fn quote(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
