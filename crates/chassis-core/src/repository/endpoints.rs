//! Backend endpoints used outside the listing controller

/// Per-chassis collection fetched by the movement-history detail screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildCollection {
    pub path: &'static str,
    /// Rows missing this field are dropped
    pub key_field: &'static str,
}

impl ChildCollection {
    /// `chassismh/<stock_id>`
    pub fn path_for(&self, stock_id: &str) -> String {
        format!("{}/{}", self.path, stock_id.trim())
    }
}

pub const MOVEMENTS: ChildCollection = ChildCollection { path: "chassismh", key_field: "chassismh_id" };
pub const SALES_ORDERS: ChildCollection = ChildCollection { path: "dsoi", key_field: "so_id" };
pub const QUOTATIONS: ChildCollection = ChildCollection { path: "quote", key_field: "quot_id" };
pub const FILES: ChildCollection = ChildCollection { path: "chassisfile", key_field: "file_path" };

pub const CHILD_COLLECTIONS: [ChildCollection; 4] = [MOVEMENTS, SALES_ORDERS, QUOTATIONS, FILES];

/// Server-rendered PDF reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    SalesOrder,
    Quotation,
}

impl DocumentKind {
    pub fn endpoint(&self) -> &'static str {
        match self {
            DocumentKind::SalesOrder => "generate-so",
            DocumentKind::Quotation => "generate-sq",
        }
    }

    /// Name of the id field in the request body
    pub fn id_field(&self) -> &'static str {
        match self {
            DocumentKind::SalesOrder => "so_id",
            DocumentKind::Quotation => "sq_id",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_paths() {
        let paths: Vec<String> = CHILD_COLLECTIONS.iter().map(|c| c.path_for(" HS1234 ")).collect();
        assert_eq!(paths, vec!["chassismh/HS1234", "dsoi/HS1234", "quote/HS1234", "chassisfile/HS1234"]);
    }

    #[test]
    fn test_document_kinds() {
        assert_eq!(DocumentKind::SalesOrder.endpoint(), "generate-so");
        assert_eq!(DocumentKind::Quotation.id_field(), "sq_id");
    }
}
