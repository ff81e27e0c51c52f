// Master data
pub mod buyers;
pub mod carries;
pub mod localities;
pub mod sellers;
pub mod warehouses;

// Warehouse layout and staff
pub mod employees;
pub mod sections;

// Products and stock
pub mod product_batches;
pub mod product_records;
pub mod products;

// Orders
pub mod inbound_orders;
pub mod purchase_orders;
