pub mod buyers;
pub mod carries;
pub mod common;
pub mod employees;
pub mod health;
pub mod inbound_orders;
pub mod localities;
pub mod product_batches;
pub mod product_records;
pub mod products;
pub mod purchase_orders;
pub mod sections;
pub mod sellers;
pub mod warehouses;

use crate::{
    repositories::{
        SeaOrmBuyerRepository, SeaOrmCarryRepository, SeaOrmEmployeeRepository,
        SeaOrmInboundOrderRepository, SeaOrmLocalityRepository, SeaOrmProductBatchRepository,
        SeaOrmProductRecordRepository, SeaOrmProductRepository, SeaOrmPurchaseOrderRepository,
        SeaOrmSectionRepository, SeaOrmSellerRepository, SeaOrmWarehouseRepository,
    },
    services::{
        buyers::BuyerService, carries::CarryService, employees::EmployeeService,
        inbound_orders::InboundOrderService, localities::LocalityService,
        product_batches::ProductBatchService, product_records::ProductRecordService,
        products::ProductService, purchase_orders::PurchaseOrderService,
        sections::SectionService, sellers::SellerService, warehouses::WarehouseService,
    },
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer used by the HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub localities: LocalityService,
    pub sellers: SellerService,
    pub warehouses: WarehouseService,
    pub carries: CarryService,
    pub employees: EmployeeService,
    pub buyers: BuyerService,
    pub sections: SectionService,
    pub products: ProductService,
    pub product_batches: ProductBatchService,
    pub product_records: ProductRecordService,
    pub purchase_orders: PurchaseOrderService,
    pub inbound_orders: InboundOrderService,
}

impl AppServices {
    /// Wires every service to its `sea-orm` repository over one shared pool.
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        let buyers = Arc::new(SeaOrmBuyerRepository::new(db.clone()));
        let employees = Arc::new(SeaOrmEmployeeRepository::new(db.clone()));
        let warehouses = Arc::new(SeaOrmWarehouseRepository::new(db.clone()));
        let batches = Arc::new(SeaOrmProductBatchRepository::new(db.clone()));

        Self {
            localities: LocalityService::new(Arc::new(SeaOrmLocalityRepository::new(db.clone()))),
            sellers: SellerService::new(Arc::new(SeaOrmSellerRepository::new(db.clone()))),
            warehouses: WarehouseService::new(warehouses.clone()),
            carries: CarryService::new(Arc::new(SeaOrmCarryRepository::new(db.clone()))),
            employees: EmployeeService::new(employees.clone()),
            buyers: BuyerService::new(buyers.clone()),
            sections: SectionService::new(Arc::new(SeaOrmSectionRepository::new(db.clone()))),
            products: ProductService::new(Arc::new(SeaOrmProductRepository::new(db.clone()))),
            product_batches: ProductBatchService::new(batches.clone()),
            product_records: ProductRecordService::new(Arc::new(
                SeaOrmProductRecordRepository::new(db.clone()),
            )),
            purchase_orders: PurchaseOrderService::new(
                Arc::new(SeaOrmPurchaseOrderRepository::new(db.clone())),
                buyers,
            ),
            inbound_orders: InboundOrderService::new(
                Arc::new(SeaOrmInboundOrderRepository::new(db)),
                employees,
                batches,
                warehouses,
            ),
        }
    }
}
