//! Product models

use serde::{Deserialize, Serialize};

use super::ApiEnvelope;

// == Features ==
/// Technical sheet of a vehicle product. Every field is optional; the API
/// only sends what applies to the product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductFeatures {
    pub motor: Option<String>,
    pub chasis: Option<Chassis>,
    pub frenos: Option<Vec<String>>,
    pub tanque: Option<Tank>,
    pub confort: Option<Vec<String>>,
    pub cilindros: Option<String>,
    pub desempeno: Option<Performance>,
    pub inyeccion: Option<String>,
    pub neumatico: Option<String>,
    pub torque_nm: Option<String>,
    pub combustible: Option<String>,
    pub potencia_hp: Option<String>,
    pub transmision: Option<Transmission>,
    pub alimentacion: Option<String>,
    pub norma_ambiental: Option<String>,
    pub sistema_electrico: Option<ElectricalSystem>,
    pub desplazamiento_cm3: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Chassis {
    pub direccion: Option<String>,
    pub suspension_trasero: Option<String>,
    pub barra_estabilizadora: Option<String>,
    pub suspension_delantero: Option<String>,
    pub amortiguadores_traseros: Option<String>,
    pub amortiguadores_delanteros: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tank {
    pub material: Option<String>,
    #[serde(rename = "capacidad_L")]
    pub capacidad_l: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Performance {
    pub cabina: Option<String>,
    pub numero_ruedas: Option<String>,
    pub radio_giro_mm: Option<String>,
    pub dimensiones_mm: Option<String>,
    pub peso_chasis_kg: Option<String>,
    pub distancia_ejes_mm: Option<String>,
    pub capacidad_carga_kg: Option<String>,
    pub peso_total_neto_kg: Option<String>,
    pub capacidad_eje_trasero_kg: Option<String>,
    pub capacidad_eje_delantero_kg: Option<String>,
    pub arranque_en_pendiente_percent: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transmission {
    pub tipo: Option<String>,
    pub modelo: Option<String>,
    pub marchas: Option<String>,
    pub traccion: Option<String>,
    pub relacion_final: Option<String>,
    pub relacion_reversa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectricalSystem {
    #[serde(rename = "voltaje_V")]
    pub voltaje_v: Option<String>,
    pub numero_baterias: Option<String>,
}

// == Product ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub sku: String,
    pub price: f64,
    #[serde(default)]
    pub image_url: String,
    pub active: bool,
    pub public: bool,
    pub has_stock: bool,
    pub stock: i64,
    pub category_id: String,
    pub category_name: String,
    pub subcategory_id: String,
    pub subcategory_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<ProductFeatures>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariation {
    pub id: u64,
    pub product_id: u64,
    pub sku: String,
    #[serde(default)]
    pub image_url: String,
    pub price: f64,
    pub stock: i64,
}

// == Search & Filter ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSearchResult {
    pub id: u64,
    pub name: String,
    pub sku: String,
    pub category_name: String,
    pub subcategory_name: String,
    #[serde(default)]
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub limit: u32,
    pub page: u32,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSearchPage {
    pub pagination: Pagination,
    pub results: Vec<ProductSearchResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFilterPage {
    pub pagination: Pagination,
    pub products: Vec<Product>,
}

/// Full body of the search endpoint, envelope included.
pub type ProductSearchResponse = ApiEnvelope<ProductSearchPage>;

/// Full body of the SKU filter endpoint, envelope included.
pub type ProductFilterBySkuResponse = ApiEnvelope<ProductFilterPage>;
