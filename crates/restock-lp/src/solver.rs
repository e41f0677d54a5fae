//! 線性規劃精確求解器

use microlp::{ComparisonOp, OptimizationDirection, Problem};
use restock_core::{
    validate_products, LpConfig, ProductRecord, RestockError, Result, SolutionResult, SolveMethod,
};

use crate::constraint::{build_constraints, check_feasibility, Relation};

/// 精確求解器
///
/// 目標：min Σ (x_i × 單位成本 + (x_i + 現有_i) × 倉儲成本)，x_i ≥ 0。
/// 不可行時回傳 [`RestockError::Infeasible`]，不會回傳部分解。
#[derive(Debug, Clone, Default)]
pub struct ExactSolver {
    config: LpConfig,
}

impl ExactSolver {
    /// 創建新的精確求解器
    pub fn new(config: LpConfig) -> Self {
        Self { config }
    }

    /// 取得配置
    pub fn config(&self) -> &LpConfig {
        &self.config
    }

    /// 求解
    pub fn solve(&self, products: &[ProductRecord]) -> Result<SolutionResult> {
        tracing::info!("開始線性規劃求解：商品 {} 筆", products.len());
        let start_time = std::time::Instant::now();

        self.config.validate()?;
        validate_products(products)?;
        let tolerance = self.config.tolerance;

        // Step 1: 可行性預檢
        tracing::debug!("Step 1: 可行性預檢");
        for product in products {
            check_feasibility(product, tolerance)?;
        }

        // Step 2: 建立模型
        tracing::debug!("Step 2: 建立模型");
        let mut problem = Problem::new(OptimizationDirection::Minimize);
        let mut constant = 0.0;
        let mut variables = Vec::with_capacity(products.len());

        for (idx, product) in products.iter().enumerate() {
            let var = problem.add_var(product.unit_cost + product.storage_cost, (0.0, f64::INFINITY));
            constant += product.on_hand * product.storage_cost;

            for constraint in build_constraints(idx, product) {
                // 無上限的最高庫存不需要約束
                if !constraint.rhs.is_finite() {
                    continue;
                }
                let op = match constraint.relation {
                    Relation::AtMost => ComparisonOp::Le,
                    Relation::AtLeast => ComparisonOp::Ge,
                };
                problem.add_constraint([(var, constraint.coefficient)], op, constraint.rhs);
            }

            variables.push(var);
        }
        tracing::debug!("變數 {} 個，常數項 {}", variables.len(), constant);

        // Step 3: 求解
        tracing::debug!("Step 3: 單純形法求解");
        let solution = problem.solve().map_err(|err| match err {
            microlp::Error::Infeasible => RestockError::Infeasible {
                product: "*".to_string(),
                reason: "約束系統無可行解".to_string(),
            },
            microlp::Error::Unbounded => RestockError::Unbounded,
            other => RestockError::SolverFailure(other.to_string()),
        })?;

        // Step 4: 取出訂購向量（容差內的負值歸零）
        let mut allocation = Vec::with_capacity(variables.len());
        for (product, &var) in products.iter().zip(&variables) {
            let value = *solution.var_value(var);
            if !value.is_finite() || value < -tolerance {
                return Err(RestockError::SolverFailure(format!(
                    "商品 {} 的訂購量異常: {}",
                    product.name, value
                )));
            }
            allocation.push(value.max(0.0));
        }

        let objective = solution.objective() + constant;

        // Step 5: 驗證約束
        tracing::debug!("Step 5: 驗證約束");
        let result = SolutionResult::from_allocation(
            SolveMethod::Exact,
            products,
            &allocation,
            objective,
            0.0,
            tolerance,
        )?;
        if let Some(breach) = result.breaches().first() {
            return Err(RestockError::SolverFailure(format!(
                "求解結果違反約束: 商品 {} {:?} {}",
                breach.product, breach.kind, breach.magnitude
            )));
        }

        tracing::info!(
            "線性規劃求解完成，總成本 {:.2}，耗時 {:?}",
            objective,
            start_time.elapsed()
        );

        Ok(result)
    }
}
