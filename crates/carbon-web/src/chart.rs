use carbon_core::view::chart::{ChartHandle, ChartSpec};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};

/// A Chart.js instance on one canvas.
pub struct ChartJsHandle {
    chart: JsValue,
}

/// Plain JS objects (not `Map`s) from JSON, as Chart.js expects.
pub fn to_js(value: &serde_json::Value) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

impl ChartJsHandle {
    /// `new Chart(canvas, config)` with the global Chart.js constructor.
    pub fn create(canvas_id: &str, spec: &ChartSpec) -> Result<ChartJsHandle, JsValue> {
        let canvas = crate::dom::by_id::<web_sys::HtmlCanvasElement>(canvas_id)?;
        let ctor = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("Chart"))?
            .dyn_into::<js_sys::Function>()
            .map_err(|_| JsValue::from_str("Chart.js is not loaded"))?;

        let config = to_js(&spec.chartjs_config())?;
        let args = js_sys::Array::of2(&canvas.into(), &config);
        let chart = js_sys::Reflect::construct(&ctor, &args)?;
        Ok(ChartJsHandle { chart })
    }

    fn call(&self, method: &str) -> Result<(), JsValue> {
        let func = js_sys::Reflect::get(&self.chart, &JsValue::from_str(method))?
            .dyn_into::<js_sys::Function>()?;
        func.call0(&self.chart)?;
        Ok(())
    }
}

impl ChartHandle for ChartJsHandle {
    type Error = JsValue;

    fn update(&mut self, spec: &ChartSpec) -> Result<(), JsValue> {
        let data = to_js(&spec.chartjs_data())?;
        js_sys::Reflect::set(&self.chart, &JsValue::from_str("data"), &data)?;
        self.call("update")
    }

    fn dispose(&mut self) {
        if let Err(e) = self.call("destroy") {
            crate::dom::log_error(&format!("chart destroy failed: {e:?}"));
        }
    }
}
