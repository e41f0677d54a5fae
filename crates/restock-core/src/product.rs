//! 商品模型

use serde::{Deserialize, Serialize};

/// 商品記錄（單一 SKU 的需求、成本與庫存上下限）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// 商品名稱
    pub name: String,

    /// 類別
    pub category: String,

    /// 本期需求量
    pub demand: f64,

    /// 現有庫存
    pub on_hand: f64,

    /// 最低庫存
    pub min_stock: f64,

    /// 最高庫存（倉容上限）
    pub max_stock: f64,

    /// 單位採購成本
    pub unit_cost: f64,

    /// 單位倉儲成本
    pub storage_cost: f64,

    /// 損耗率 [0, 1)
    pub shrinkage_rate: f64,

    /// 交貨期（天），優化不使用
    pub lead_time_days: f64,

    /// 保存期限（天），優化不使用
    pub shelf_life_days: f64,

    /// 銷售價格，優化不使用
    pub sale_price: f64,
}

impl ProductRecord {
    /// 創建新的商品記錄
    ///
    /// 庫存上下限預設為 `[0, +∞)`，成本與損耗率預設為 0
    pub fn new(name: impl Into<String>, demand: f64, on_hand: f64) -> Self {
        Self {
            name: name.into(),
            category: String::new(),
            demand,
            on_hand,
            min_stock: 0.0,
            max_stock: f64::INFINITY,
            unit_cost: 0.0,
            storage_cost: 0.0,
            shrinkage_rate: 0.0,
            lead_time_days: 0.0,
            shelf_life_days: 0.0,
            sale_price: 0.0,
        }
    }

    /// 建構器模式：設置類別
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// 建構器模式：設置庫存上下限
    pub fn with_stock_bounds(mut self, min_stock: f64, max_stock: f64) -> Self {
        self.min_stock = min_stock;
        self.max_stock = max_stock;
        self
    }

    /// 建構器模式：設置採購與倉儲成本
    pub fn with_costs(mut self, unit_cost: f64, storage_cost: f64) -> Self {
        self.unit_cost = unit_cost;
        self.storage_cost = storage_cost;
        self
    }

    /// 建構器模式：設置損耗率
    pub fn with_shrinkage_rate(mut self, rate: f64) -> Self {
        self.shrinkage_rate = rate;
        self
    }

    /// 建構器模式：設置交貨期、保存期限與售價
    pub fn with_logistics(mut self, lead_time_days: f64, shelf_life_days: f64, sale_price: f64) -> Self {
        self.lead_time_days = lead_time_days;
        self.shelf_life_days = shelf_life_days;
        self.sale_price = sale_price;
        self
    }

    /// 可用比例（扣除損耗後）
    pub fn retention(&self) -> f64 {
        1.0 - self.shrinkage_rate
    }

    /// 允許的最大訂購量（可能為負，代表現有庫存已超過上限）
    pub fn order_headroom(&self) -> f64 {
        self.max_stock - self.on_hand
    }

    /// 滿足損耗後需求所需的最低總庫存
    pub fn stock_needed_for_demand(&self) -> f64 {
        self.demand / self.retention()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_product() {
        let product = ProductRecord::new("MILK-1L", 120.0, 30.0)
            .with_category("Dairy")
            .with_stock_bounds(20.0, 200.0)
            .with_costs(1.5, 0.1)
            .with_shrinkage_rate(0.05);

        assert_eq!(product.name, "MILK-1L");
        assert_eq!(product.category, "Dairy");
        assert_eq!(product.min_stock, 20.0);
        assert_eq!(product.max_stock, 200.0);
        assert_eq!(product.order_headroom(), 170.0);
        assert!((product.retention() - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_defaults_are_unbounded() {
        let product = ProductRecord::new("BREAD", 10.0, 0.0);

        assert_eq!(product.min_stock, 0.0);
        assert!(product.max_stock.is_infinite());
        assert_eq!(product.unit_cost, 0.0);
        assert_eq!(product.shrinkage_rate, 0.0);
    }

    #[test]
    fn test_stock_needed_for_demand() {
        let product = ProductRecord::new("EGGS", 90.0, 0.0).with_shrinkage_rate(0.1);

        // 90 / 0.9 = 100
        assert!((product.stock_needed_for_demand() - 100.0).abs() < 1e-9);
    }
}
