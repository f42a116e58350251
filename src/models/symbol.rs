use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A single entry of the symbol registry: ticker plus display name.
///
/// Sector is optional reference data; when absent it is filled from the
/// company profile fetched during enrichment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolInfo {
    pub symbol: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
}

impl SymbolInfo {
    pub fn new(symbol: &str, name: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            sector: None,
        }
    }
}

/// Immutable symbol registry passed into the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolRegistry {
    pub symbols: Vec<SymbolInfo>,
}

impl SymbolRegistry {
    /// Load a registry from a JSON file (array of {symbol, name, sector?}).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let symbols: Vec<SymbolInfo> = serde_json::from_str(&content)?;
        Ok(Self { symbols })
    }

    /// The built-in IDX blue-chip list (Yahoo Finance `.JK` suffix).
    pub fn builtin() -> Self {
        let symbols = [
            ("BBCA.JK", "Bank Central Asia"),
            ("BBRI.JK", "Bank Rakyat Indonesia"),
            ("BMRI.JK", "Bank Mandiri"),
            ("TLKM.JK", "Telkom Indonesia"),
            ("ASII.JK", "Astra International"),
            ("UNVR.JK", "Unilever Indonesia"),
            ("GGRM.JK", "Gudang Garam"),
            ("HMSP.JK", "HM Sampoerna"),
            ("ICBP.JK", "Indofood CBP"),
            ("INDF.JK", "Indofood Sukses Makmur"),
            ("KLBF.JK", "Kalbe Farma"),
            ("SMGR.JK", "Semen Indonesia"),
            ("UNTR.JK", "United Tractors"),
            ("PGAS.JK", "Perusahaan Gas Negara"),
            ("JSMR.JK", "Jasa Marga"),
            ("BBNI.JK", "Bank Negara Indonesia"),
            ("ADRO.JK", "Adaro Energy"),
            ("ANTM.JK", "Aneka Tambang"),
            ("BRIS.JK", "Bank Syariah Indonesia"),
            ("TOWR.JK", "Sarana Menara Nusantara"),
        ];

        Self {
            symbols: symbols
                .iter()
                .map(|(symbol, name)| SymbolInfo::new(symbol, name))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SymbolInfo> {
        self.symbols.iter()
    }

    pub fn get(&self, symbol: &str) -> Option<&SymbolInfo> {
        self.symbols.iter().find(|s| s.symbol == symbol)
    }
}
