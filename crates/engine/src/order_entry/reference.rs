//! Reference lists feeding the order form selectors.
//!
//! Each list is fetched on its own so one failing or slow endpoint never
//! holds back the others. A failed list stays empty; the failure is logged
//! and not retried.

use std::fmt;

use yousmala_api::{ApiError, BackOfficeApi};
use yousmala_types::{Client, Product, Supplier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Suppliers,
    Clients,
    Products,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 3] = [Self::Suppliers, Self::Clients, Self::Products];
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Suppliers => "suppliers",
            Self::Clients => "clients",
            Self::Products => "products",
        })
    }
}

/// A successfully fetched reference list.
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceList {
    Suppliers(Vec<Supplier>),
    Clients(Vec<Client>),
    Products(Vec<Product>),
}

impl ReferenceList {
    pub fn kind(&self) -> ReferenceKind {
        match self {
            Self::Suppliers(_) => ReferenceKind::Suppliers,
            Self::Clients(_) => ReferenceKind::Clients,
            Self::Products(_) => ReferenceKind::Products,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Suppliers(items) => items.len(),
            Self::Clients(items) => items.len(),
            Self::Products(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of fetching one reference list.
#[derive(Debug)]
pub struct ReferenceFetch {
    pub kind: ReferenceKind,
    pub result: Result<ReferenceList, ApiError>,
}

/// Fetch a single reference list.
pub async fn fetch_reference_list(api: &dyn BackOfficeApi, kind: ReferenceKind) -> ReferenceFetch {
    let result = match kind {
        ReferenceKind::Suppliers => api.list_suppliers().await.map(ReferenceList::Suppliers),
        ReferenceKind::Clients => api.list_clients().await.map(ReferenceList::Clients),
        ReferenceKind::Products => api.list_products().await.map(ReferenceList::Products),
    };
    ReferenceFetch { kind, result }
}

/// The selector contents held for the lifetime of the workflow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub suppliers: Vec<Supplier>,
    pub clients: Vec<Client>,
    pub products: Vec<Product>,
}

impl ReferenceData {
    pub(crate) fn replace(&mut self, list: ReferenceList) {
        match list {
            ReferenceList::Suppliers(items) => self.suppliers = items,
            ReferenceList::Clients(items) => self.clients = items,
            ReferenceList::Products(items) => self.products = items,
        }
    }

    pub(crate) fn clear(&mut self, kind: ReferenceKind) {
        match kind {
            ReferenceKind::Suppliers => self.suppliers.clear(),
            ReferenceKind::Clients => self.clients.clear(),
            ReferenceKind::Products => self.products.clear(),
        }
    }
}
