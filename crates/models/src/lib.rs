use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub const DEFAULT_API_URL: &str = "http://apisenarpe.dematech.io:8051/api/framework/v1/consultaSQLServer/RealizaConsulta/WS.ORC.REAL.DASH/1/T?";
pub const DEFAULT_BRANDING_PATH: &str = "dematech.svg";
pub const DEFAULT_PAGE_TITLE: &str = "Senar Pernambuco";

// Settings models
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub api_url: String,
	pub branding_path: String,
	pub page_title: String,
	pub host: String,
	pub port: u16,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			api_url: DEFAULT_API_URL.to_string(),
			branding_path: DEFAULT_BRANDING_PATH.to_string(),
			page_title: DEFAULT_PAGE_TITLE.to_string(),
			host: "127.0.0.1".to_string(),
			port: 8501,
		}
	}
}

/// HTTP Basic credentials for the budget API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	pub user: String,
	pub password: String,
}

impl Credentials {
	pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
		Self {
			user: user.into(),
			password: password.into(),
		}
	}
}

impl fmt::Debug for Credentials {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Credentials")
			.field("user", &self.user)
			.field("password", &"<redacted>")
			.finish()
	}
}

// Calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
	Janeiro,
	Fevereiro,
	#[serde(rename = "Março")]
	Marco,
	Abril,
	Maio,
	Junho,
	Julho,
	Agosto,
	Setembro,
	Outubro,
	Novembro,
	Dezembro,
}

impl Month {
	/// Column name used by the API for this month.
	pub fn field_name(self) -> &'static str {
		match self {
			Month::Janeiro => "Janeiro",
			Month::Fevereiro => "Fevereiro",
			Month::Marco => "Março",
			Month::Abril => "Abril",
			Month::Maio => "Maio",
			Month::Junho => "Junho",
			Month::Julho => "Julho",
			Month::Agosto => "Agosto",
			Month::Setembro => "Setembro",
			Month::Outubro => "Outubro",
			Month::Novembro => "Novembro",
			Month::Dezembro => "Dezembro",
		}
	}
}

impl fmt::Display for Month {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.field_name())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quarter {
	Q1,
	Q2,
	Q3,
	Q4,
}

impl Quarter {
	pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

	pub fn months(self) -> [Month; 3] {
		match self {
			Quarter::Q1 => [Month::Janeiro, Month::Fevereiro, Month::Marco],
			Quarter::Q2 => [Month::Abril, Month::Maio, Month::Junho],
			Quarter::Q3 => [Month::Julho, Month::Agosto, Month::Setembro],
			Quarter::Q4 => [Month::Outubro, Month::Novembro, Month::Dezembro],
		}
	}

	/// Series name shown in the quarterly chart legend.
	pub fn series_name(self) -> &'static str {
		match self {
			Quarter::Q1 => "Trimestre1",
			Quarter::Q2 => "Trimestre2",
			Quarter::Q3 => "Trimestre3",
			Quarter::Q4 => "Trimestre4",
		}
	}
}

// Raw input rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
	#[serde(rename = "CODCLASSIFICA", default)]
	pub code: Option<String>,
	#[serde(rename = "Janeiro", default)]
	pub janeiro: Option<f64>,
	#[serde(rename = "Fevereiro", default)]
	pub fevereiro: Option<f64>,
	#[serde(rename = "Março", default)]
	pub marco: Option<f64>,
	#[serde(rename = "Abril", default)]
	pub abril: Option<f64>,
	#[serde(rename = "Maio", default)]
	pub maio: Option<f64>,
	#[serde(rename = "Junho", default)]
	pub junho: Option<f64>,
	#[serde(rename = "Julho", default)]
	pub julho: Option<f64>,
	#[serde(rename = "Agosto", default)]
	pub agosto: Option<f64>,
	#[serde(rename = "Setembro", default)]
	pub setembro: Option<f64>,
	#[serde(rename = "Outubro", default)]
	pub outubro: Option<f64>,
	#[serde(rename = "Novembro", default)]
	pub novembro: Option<f64>,
	#[serde(rename = "Dezembro", default)]
	pub dezembro: Option<f64>,
	#[serde(rename = "Total", default)]
	pub total: Option<f64>,
	/// Any other column returned by the query, kept as-is.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl RawRecord {
	pub fn month(&self, month: Month) -> Option<f64> {
		match month {
			Month::Janeiro => self.janeiro,
			Month::Fevereiro => self.fevereiro,
			Month::Marco => self.marco,
			Month::Abril => self.abril,
			Month::Maio => self.maio,
			Month::Junho => self.junho,
			Month::Julho => self.julho,
			Month::Agosto => self.agosto,
			Month::Setembro => self.setembro,
			Month::Outubro => self.outubro,
			Month::Novembro => self.novembro,
			Month::Dezembro => self.dezembro,
		}
	}
}

// Classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Classification {
	#[serde(rename = "FIM")]
	Fim,
	#[serde(rename = "Meio")]
	Meio,
	#[serde(rename = "Recurso de Terceiro")]
	RecursoDeTerceiro,
}

impl Classification {
	pub const ALL: [Classification; 3] = [
		Classification::Fim,
		Classification::Meio,
		Classification::RecursoDeTerceiro,
	];

	pub fn label(self) -> &'static str {
		match self {
			Classification::Fim => "FIM",
			Classification::Meio => "Meio",
			Classification::RecursoDeTerceiro => "Recurso de Terceiro",
		}
	}
}

impl fmt::Display for Classification {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
	/// Position of the row in the API response.
	pub row: usize,
	#[serde(rename = "Classificacao")]
	pub classification: Classification,
	#[serde(flatten)]
	pub record: RawRecord,
}

// Aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyAggregate {
	#[serde(rename = "Classificacao")]
	pub classification: Classification,
	#[serde(rename = "Trimestre1")]
	pub q1: f64,
	#[serde(rename = "Trimestre2")]
	pub q2: f64,
	#[serde(rename = "Trimestre3")]
	pub q3: f64,
	#[serde(rename = "Trimestre4")]
	pub q4: f64,
}

impl QuarterlyAggregate {
	pub fn get(&self, quarter: Quarter) -> f64 {
		match quarter {
			Quarter::Q1 => self.q1,
			Quarter::Q2 => self.q2,
			Quarter::Q3 => self.q3,
			Quarter::Q4 => self.q4,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
	#[serde(rename = "Classificacao")]
	pub classification: Classification,
	pub month: Month,
	pub value: f64,
}

/// Field a category peak is ranked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeakField {
	Month(Month),
	Total,
}

impl PeakField {
	pub fn label(self) -> &'static str {
		match self {
			PeakField::Month(m) => m.field_name(),
			PeakField::Total => "Total",
		}
	}

	pub fn value_of(self, record: &RawRecord) -> Option<f64> {
		match self {
			PeakField::Month(m) => record.month(m),
			PeakField::Total => record.total,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPeak {
	#[serde(rename = "Classificacao")]
	pub classification: Classification,
	pub field: PeakField,
	pub value: f64,
	pub row: usize,
	pub record: RawRecord,
}

// Presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
	pub name: String,
	pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
	pub title: String,
	pub x_axis_title: String,
	pub y_axis_title: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub legend_title: Option<String>,
	pub grouped: bool,
	pub categories: Vec<String>,
	pub series: Vec<Series>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridSlot {
	pub row: u8,
	pub column: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPanel {
	pub caption: String,
	pub slot: GridSlot,
	pub chart: ChartSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardLayout {
	pub page_title: String,
	pub panels: Vec<ChartPanel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Branding {
	Image { data_uri: String },
	Unavailable { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidebarSpec {
	pub branding: Branding,
	pub title: String,
	pub selector_label: String,
	pub options: Vec<String>,
}

// Output models
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardMetadata {
	pub generated_at: String,
	pub records_received: usize,
	pub records_classified: usize,
	pub records_dropped: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
	pub metadata: DashboardMetadata,
	pub quarterly: Vec<QuarterlyAggregate>,
	pub january: Vec<MonthlyAggregate>,
	pub january_peaks: Vec<CategoryPeak>,
	pub total_peaks: Vec<CategoryPeak>,
	pub layout: DashboardLayout,
	#[serde(default)]
	pub warnings: Vec<String>,
}
