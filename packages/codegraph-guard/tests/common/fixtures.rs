//! Source fixtures
//!
//! Every snippet method receives the same parameters so test bodies can use
//! them directly:
//!
//! | name      | type                         |
//! |-----------|------------------------------|
//! | `r`, `q`  | `Result<int>`                |
//! | `m`       | `Maybe<string>`              |
//! | `results` | `List<Result<int>>`          |
//! | `maybes`  | `IEnumerable<Maybe<string>>` |
//! | `pending` | `Task<Result<int>>`          |
//! | `b`       | `bool`                       |

pub const PARAMETERS: &str = "Result<int> r, Result<int> q, Maybe<string> m, \
     List<Result<int>> results, IEnumerable<Maybe<string>> maybes, \
     Task<Result<int>> pending, bool b";

/// `body` wrapped in a method with the standard parameters
pub fn method_source(body: &str) -> String {
    format!("void Check({}) {{\n{}\n}}", PARAMETERS, body)
}

/// Same, as an `async` method
pub fn async_method_source(body: &str) -> String {
    format!("async Task Check({}) {{\n{}\n}}", PARAMETERS, body)
}

/// A realistic service class body (fields plus several methods)
pub fn order_service_source() -> &'static str {
    r#"
private Result<int> _lastOrder;

Result<int> Load(int id) { return Result.Success(id); }

int Total(Result<int> order) {
    if (order.IsFailure) {
        return 0;
    }
    return order.Value;
}

int Describe(Result<int> order) {
    if (order.IsSuccess) {
        Log(order.Value);
    } else {
        Log(order.Error);
    }
    return order.IsSuccess ? order.Value : -1;
}

void Remember() {
    if (this._lastOrder.IsSuccess) {
        Log(_lastOrder.Value);
    }
    Log(_lastOrder.Error);
}

int Fresh() {
    return Load(7).Value + Result.Success(3).Value;
}

List<int> Totals(List<Result<int>> orders) {
    var ok = orders.Where(o => o.IsSuccess).Take(10).Select(o => o.Value).ToList();
    var all = orders.Select(o => o.Value).ToList();
    return ok;
}

bool Missing(Result<int> order) {
    return order == null;
}
"#
}
