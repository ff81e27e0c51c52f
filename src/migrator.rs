use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241001_000001_create_reference_tables::Migration),
            Box::new(m20241001_000002_create_catalogue_tables::Migration),
            Box::new(m20241001_000003_create_stock_tables::Migration),
            Box::new(m20241001_000004_create_logs_table::Migration),
        ]
    }
}

// Identifiers shared by every migration below

#[derive(DeriveIden)]
enum Localities {
    Table,
    Id,
    LocalityName,
    ProvinceName,
    CountryName,
}

#[derive(DeriveIden)]
enum ProductTypes {
    Table,
    Id,
    Description,
}

#[derive(DeriveIden)]
enum OrderStatus {
    Table,
    Id,
    Description,
}

#[derive(DeriveIden)]
enum Sellers {
    Table,
    Id,
    Cid,
    CompanyName,
    Address,
    Telephone,
    LocalityId,
}

#[derive(DeriveIden)]
enum Warehouses {
    Table,
    Id,
    Address,
    Telephone,
    WarehouseCode,
    MinimumCapacity,
    MinimumTemperature,
}

#[derive(DeriveIden)]
enum Carries {
    Table,
    Id,
    Cid,
    CompanyName,
    Address,
    Telephone,
    LocalityId,
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    CardNumberId,
    FirstName,
    LastName,
    WarehouseId,
}

#[derive(DeriveIden)]
enum Buyers {
    Table,
    Id,
    CardNumberId,
    FirstName,
    LastName,
}

#[derive(DeriveIden)]
enum Sections {
    Table,
    Id,
    SectionNumber,
    CurrentTemperature,
    MinimumTemperature,
    CurrentCapacity,
    MinimumCapacity,
    MaximumCapacity,
    WarehouseId,
    ProductTypeId,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Description,
    ExpirationRate,
    FreezingRate,
    Height,
    Length,
    Width,
    NetWeight,
    ProductCode,
    RecommendedFreezingTemperature,
    ProductTypeId,
    SellerId,
}

#[derive(DeriveIden)]
enum ProductBatches {
    Table,
    Id,
    BatchNumber,
    CurrentQuantity,
    CurrentTemperature,
    DueDate,
    InitialQuantity,
    ManufacturingDate,
    ManufacturingHour,
    MinimumTemperature,
    ProductId,
    SectionId,
}

#[derive(DeriveIden)]
enum ProductRecords {
    Table,
    Id,
    LastUpdateDate,
    PurchasePrice,
    SalePrice,
    ProductId,
}

#[derive(DeriveIden)]
enum PurchaseOrders {
    Table,
    Id,
    OrderNumber,
    OrderDate,
    TrackingCode,
    BuyerId,
    ProductRecordId,
    OrderStatusId,
}

#[derive(DeriveIden)]
enum InboundOrders {
    Table,
    Id,
    OrderDate,
    OrderNumber,
    EmployeeId,
    ProductBatchId,
    WarehouseId,
}

#[derive(DeriveIden)]
enum Logs {
    Table,
    Id,
    LoggedAt,
    OsUser,
    RequestId,
    File,
    Line,
    Function,
    Message,
}

fn id_column<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

mod m20241001_000001_create_reference_tables {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20241001_000001_create_reference_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Localities::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Localities::Id)
                                .string_len(64)
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Localities::LocalityName).string().not_null())
                        .col(ColumnDef::new(Localities::ProvinceName).string().not_null())
                        .col(ColumnDef::new(Localities::CountryName).string().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ProductTypes::Table)
                        .if_not_exists()
                        .col(id_column(ProductTypes::Id))
                        .col(
                            ColumnDef::new(ProductTypes::Description)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(OrderStatus::Table)
                        .if_not_exists()
                        .col(id_column(OrderStatus::Id))
                        .col(
                            ColumnDef::new(OrderStatus::Description)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .to_owned(),
                )
                .await?;

            let product_types = Query::insert()
                .into_table(ProductTypes::Table)
                .columns([ProductTypes::Id, ProductTypes::Description])
                .values_panic([1.into(), "fresh".into()])
                .values_panic([2.into(), "refrigerated".into()])
                .values_panic([3.into(), "frozen".into()])
                .to_owned();
            manager.exec_stmt(product_types).await?;

            let order_status = Query::insert()
                .into_table(OrderStatus::Table)
                .columns([OrderStatus::Id, OrderStatus::Description])
                .values_panic([1.into(), "pending".into()])
                .values_panic([2.into(), "in_progress".into()])
                .values_panic([3.into(), "delivered".into()])
                .to_owned();
            manager.exec_stmt(order_status).await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrderStatus::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ProductTypes::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Localities::Table).to_owned())
                .await
        }
    }
}

mod m20241001_000002_create_catalogue_tables {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20241001_000002_create_catalogue_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Sellers::Table)
                        .if_not_exists()
                        .col(id_column(Sellers::Id))
                        .col(ColumnDef::new(Sellers::Cid).integer().not_null().unique_key())
                        .col(ColumnDef::new(Sellers::CompanyName).string().not_null())
                        .col(ColumnDef::new(Sellers::Address).string().not_null())
                        .col(ColumnDef::new(Sellers::Telephone).string().not_null())
                        .col(ColumnDef::new(Sellers::LocalityId).string_len(64).not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sellers_locality_id")
                                .from(Sellers::Table, Sellers::LocalityId)
                                .to(Localities::Table, Localities::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Warehouses::Table)
                        .if_not_exists()
                        .col(id_column(Warehouses::Id))
                        .col(ColumnDef::new(Warehouses::Address).string().not_null())
                        .col(ColumnDef::new(Warehouses::Telephone).string().not_null())
                        .col(
                            ColumnDef::new(Warehouses::WarehouseCode)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(Warehouses::MinimumCapacity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Warehouses::MinimumTemperature)
                                .integer()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Carries::Table)
                        .if_not_exists()
                        .col(id_column(Carries::Id))
                        .col(
                            ColumnDef::new(Carries::Cid)
                                .string_len(10)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Carries::CompanyName).string().not_null())
                        .col(ColumnDef::new(Carries::Address).string().not_null())
                        .col(ColumnDef::new(Carries::Telephone).string().not_null())
                        .col(ColumnDef::new(Carries::LocalityId).string_len(64).not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_carries_locality_id")
                                .from(Carries::Table, Carries::LocalityId)
                                .to(Localities::Table, Localities::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Employees::Table)
                        .if_not_exists()
                        .col(id_column(Employees::Id))
                        .col(
                            ColumnDef::new(Employees::CardNumberId)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Employees::FirstName).string().not_null())
                        .col(ColumnDef::new(Employees::LastName).string().not_null())
                        .col(ColumnDef::new(Employees::WarehouseId).integer().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_employees_warehouse_id")
                                .from(Employees::Table, Employees::WarehouseId)
                                .to(Warehouses::Table, Warehouses::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Buyers::Table)
                        .if_not_exists()
                        .col(id_column(Buyers::Id))
                        .col(
                            ColumnDef::new(Buyers::CardNumberId)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Buyers::FirstName).string().not_null())
                        .col(ColumnDef::new(Buyers::LastName).string().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Sections::Table)
                        .if_not_exists()
                        .col(id_column(Sections::Id))
                        .col(
                            ColumnDef::new(Sections::SectionNumber)
                                .integer()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(Sections::CurrentTemperature)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Sections::MinimumTemperature)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Sections::CurrentCapacity).integer().not_null())
                        .col(ColumnDef::new(Sections::MinimumCapacity).integer().not_null())
                        .col(ColumnDef::new(Sections::MaximumCapacity).integer().not_null())
                        .col(ColumnDef::new(Sections::WarehouseId).integer().not_null())
                        .col(ColumnDef::new(Sections::ProductTypeId).integer().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sections_warehouse_id")
                                .from(Sections::Table, Sections::WarehouseId)
                                .to(Warehouses::Table, Warehouses::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sections_product_type_id")
                                .from(Sections::Table, Sections::ProductTypeId)
                                .to(ProductTypes::Table, ProductTypes::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(id_column(Products::Id))
                        .col(ColumnDef::new(Products::Description).string().not_null())
                        .col(ColumnDef::new(Products::ExpirationRate).double().not_null())
                        .col(ColumnDef::new(Products::FreezingRate).double().not_null())
                        .col(ColumnDef::new(Products::Height).double().not_null())
                        .col(ColumnDef::new(Products::Length).double().not_null())
                        .col(ColumnDef::new(Products::Width).double().not_null())
                        .col(ColumnDef::new(Products::NetWeight).double().not_null())
                        .col(
                            ColumnDef::new(Products::ProductCode)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(Products::RecommendedFreezingTemperature)
                                .double()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Products::ProductTypeId).integer().not_null())
                        .col(ColumnDef::new(Products::SellerId).integer().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_products_product_type_id")
                                .from(Products::Table, Products::ProductTypeId)
                                .to(ProductTypes::Table, ProductTypes::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_products_seller_id")
                                .from(Products::Table, Products::SellerId)
                                .to(Sellers::Table, Sellers::Id),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            for table in [
                Products::Table.into_iden(),
                Sections::Table.into_iden(),
                Buyers::Table.into_iden(),
                Employees::Table.into_iden(),
                Carries::Table.into_iden(),
                Warehouses::Table.into_iden(),
                Sellers::Table.into_iden(),
            ] {
                manager
                    .drop_table(Table::drop().table(table).to_owned())
                    .await?;
            }
            Ok(())
        }
    }
}

mod m20241001_000003_create_stock_tables {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20241001_000003_create_stock_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ProductBatches::Table)
                        .if_not_exists()
                        .col(id_column(ProductBatches::Id))
                        .col(
                            ColumnDef::new(ProductBatches::BatchNumber)
                                .integer()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(ProductBatches::CurrentQuantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductBatches::CurrentTemperature)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ProductBatches::DueDate).date().not_null())
                        .col(
                            ColumnDef::new(ProductBatches::InitialQuantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductBatches::ManufacturingDate)
                                .date()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductBatches::ManufacturingHour)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductBatches::MinimumTemperature)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ProductBatches::ProductId).integer().not_null())
                        .col(ColumnDef::new(ProductBatches::SectionId).integer().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_batches_product_id")
                                .from(ProductBatches::Table, ProductBatches::ProductId)
                                .to(Products::Table, Products::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_batches_section_id")
                                .from(ProductBatches::Table, ProductBatches::SectionId)
                                .to(Sections::Table, Sections::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ProductRecords::Table)
                        .if_not_exists()
                        .col(id_column(ProductRecords::Id))
                        .col(
                            ColumnDef::new(ProductRecords::LastUpdateDate)
                                .date()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductRecords::PurchasePrice)
                                .decimal_len(16, 4)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductRecords::SalePrice)
                                .decimal_len(16, 4)
                                .not_null(),
                        )
                        .col(ColumnDef::new(ProductRecords::ProductId).integer().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_records_product_id")
                                .from(ProductRecords::Table, ProductRecords::ProductId)
                                .to(Products::Table, Products::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(PurchaseOrders::Table)
                        .if_not_exists()
                        .col(id_column(PurchaseOrders::Id))
                        .col(
                            ColumnDef::new(PurchaseOrders::OrderNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(PurchaseOrders::OrderDate).date().not_null())
                        .col(
                            ColumnDef::new(PurchaseOrders::TrackingCode)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PurchaseOrders::BuyerId).integer().not_null())
                        .col(
                            ColumnDef::new(PurchaseOrders::ProductRecordId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::OrderStatusId)
                                .integer()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_purchase_orders_buyer_id")
                                .from(PurchaseOrders::Table, PurchaseOrders::BuyerId)
                                .to(Buyers::Table, Buyers::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_purchase_orders_product_record_id")
                                .from(PurchaseOrders::Table, PurchaseOrders::ProductRecordId)
                                .to(ProductRecords::Table, ProductRecords::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_purchase_orders_order_status_id")
                                .from(PurchaseOrders::Table, PurchaseOrders::OrderStatusId)
                                .to(OrderStatus::Table, OrderStatus::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InboundOrders::Table)
                        .if_not_exists()
                        .col(id_column(InboundOrders::Id))
                        .col(ColumnDef::new(InboundOrders::OrderDate).date().not_null())
                        .col(
                            ColumnDef::new(InboundOrders::OrderNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(InboundOrders::EmployeeId).integer().not_null())
                        .col(
                            ColumnDef::new(InboundOrders::ProductBatchId)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InboundOrders::WarehouseId).integer().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inbound_orders_employee_id")
                                .from(InboundOrders::Table, InboundOrders::EmployeeId)
                                .to(Employees::Table, Employees::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inbound_orders_product_batch_id")
                                .from(InboundOrders::Table, InboundOrders::ProductBatchId)
                                .to(ProductBatches::Table, ProductBatches::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inbound_orders_warehouse_id")
                                .from(InboundOrders::Table, InboundOrders::WarehouseId)
                                .to(Warehouses::Table, Warehouses::Id),
                        )
                        .to_owned(),
                )
                .await?;

            // Report queries group children by their parent id
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_product_batches_section_id")
                        .table(ProductBatches::Table)
                        .col(ProductBatches::SectionId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inbound_orders_employee_id")
                        .table(InboundOrders::Table)
                        .col(InboundOrders::EmployeeId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            for table in [
                InboundOrders::Table.into_iden(),
                PurchaseOrders::Table.into_iden(),
                ProductRecords::Table.into_iden(),
                ProductBatches::Table.into_iden(),
            ] {
                manager
                    .drop_table(Table::drop().table(table).to_owned())
                    .await?;
            }
            Ok(())
        }
    }
}

mod m20241001_000004_create_logs_table {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20241001_000004_create_logs_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Logs::Table)
                        .if_not_exists()
                        .col(id_column(Logs::Id))
                        .col(ColumnDef::new(Logs::LoggedAt).string().not_null())
                        .col(ColumnDef::new(Logs::OsUser).string().not_null())
                        .col(ColumnDef::new(Logs::RequestId).string().null())
                        .col(ColumnDef::new(Logs::File).string().not_null())
                        .col(ColumnDef::new(Logs::Line).integer().not_null())
                        .col(ColumnDef::new(Logs::Function).string().not_null())
                        .col(ColumnDef::new(Logs::Message).text().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Logs::Table).to_owned())
                .await
        }
    }
}
