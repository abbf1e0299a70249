//! Wires the page's DOM to an [`AnalysisSession`].

use carbon_core::analysis::AnalysisResult;
use carbon_core::client::ClientError;
use carbon_core::error::CarbonError;
use carbon_core::export::EXPORT_FILE_NAME;
use carbon_core::ui::{AnalysisSession, FileInputView};
use carbon_core::view::chart::{ChartSlot, ChartSpec};
use carbon_core::view::{ExtendedView, ReportView, ResultView, SuggestionListView, ViewVariant};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Element, File, HtmlButtonElement, HtmlInputElement, HtmlTableRowElement, HtmlTableSectionElement,
};

use crate::chart::ChartJsHandle;
use crate::dom;

const CATEGORY_CANVAS: &str = "emissionChart";
const SOURCE_CANVAS: &str = "sourceChart";

pub struct Page {
    session: RefCell<AnalysisSession<File>>,
    category_chart: RefCell<ChartSlot<ChartJsHandle>>,
    source_chart: RefCell<ChartSlot<ChartJsHandle>>,
}

impl Page {
    /// A page without listeners.
    pub fn new(variant: ViewVariant) -> Rc<Page> {
        Rc::new(Page {
            session: RefCell::new(AnalysisSession::new(variant)),
            category_chart: RefCell::new(ChartSlot::new()),
            source_chart: RefCell::new(ChartSlot::new()),
        })
    }

    pub fn session(&self) -> std::cell::Ref<'_, AnalysisSession<File>> {
        self.session.borrow()
    }

    /// Attach listeners to the page. Pages without the chart canvases get
    /// the minimal rendering.
    pub fn mount() -> Result<Rc<Page>, JsValue> {
        let variant = if dom::has_id(CATEGORY_CANVAS) {
            ViewVariant::Extended
        } else {
            ViewVariant::Minimal
        };
        let page = Page::new(variant);

        let input = dom::by_id::<HtmlInputElement>("fileInput")?;
        {
            let page = Rc::clone(&page);
            let input_ref = input.clone();
            let on_change = Closure::<dyn FnMut(web_sys::Event)>::new(move |_| {
                page.on_files_selected(&input_ref);
            });
            input.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
            on_change.forget();
        }

        let button = dom::query::<HtmlButtonElement>(".analyze-btn")?;
        {
            let page = Rc::clone(&page);
            let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |_| {
                Page::on_analyze(&page);
            });
            button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
            on_click.forget();
        }

        if dom::has_id("exportBtn") {
            let export = dom::by_id::<Element>("exportBtn")?;
            let page = Rc::clone(&page);
            let on_export = Closure::<dyn FnMut(web_sys::Event)>::new(move |_| {
                page.on_export();
            });
            export.add_event_listener_with_callback("click", on_export.as_ref().unchecked_ref())?;
            on_export.forget();
        }

        page.apply_file_input(&carbon_core::ui::file_input_view::<&str>(&[]));
        Ok(page)
    }

    fn on_files_selected(&self, input: &HtmlInputElement) {
        let mut files = Vec::new();
        if let Some(list) = input.files() {
            for i in 0..list.length() {
                if let Some(file) = list.item(i) {
                    files.push((file.name(), file));
                }
            }
        }
        let view = self.session.borrow_mut().select_files(files);
        self.apply_file_input(&view);
    }

    fn on_analyze(page: &Rc<Page>) {
        let pending = page.session.borrow_mut().begin_analysis();
        let file = match pending {
            Ok(file) => file,
            // the button is already disabled; a stray second click is dropped
            Err(ClientError::AlreadyInFlight) => return,
            Err(e) => {
                dom::alert(&e.alert_text());
                return;
            }
        };
        page.apply_button();

        let page = Rc::clone(page);
        spawn_local(async move {
            let outcome = crate::fetch::upload(&file.handle).await;
            if let Err(e) = page.show(outcome) {
                dom::log_error(&format!("analysis failed: {e}"));
                dom::alert(&e.alert_text());
            }
        });
    }

    /// Apply an upload outcome: record it, draw it and update the button.
    ///
    /// A result that cannot be drawn counts as a failed analysis.
    pub fn show(&self, outcome: Result<AnalysisResult, ClientError>) -> Result<(), ClientError> {
        let finished = self.session.borrow_mut().finish(outcome);
        let shown = finished.and_then(|view| {
            self.render(&view)
                .map_err(|e| self.session.borrow_mut().fail_render(dom::describe(&e)))
        });
        self.apply_button();
        shown
    }

    fn on_export(&self) {
        if let Err(e) = self.export() {
            dom::alert(&e.to_string());
        }
    }

    /// Download the last report. Nothing is created when there is none.
    pub fn export(&self) -> Result<(), CarbonError> {
        let uri = self.session.borrow().export_data_uri()?;
        if let Err(e) = crate::download::trigger(&uri, EXPORT_FILE_NAME) {
            dom::log_error(&format!("download failed: {}", dom::describe(&e)));
        }
        Ok(())
    }

    fn apply_file_input(&self, view: &FileInputView) {
        let _ = dom::set_text("fileName", &view.file_name);
        if let Ok(button) = dom::query::<HtmlButtonElement>(".analyze-btn") {
            button.set_disabled(!view.analyze_enabled);
            let _ = button.style().set_property("opacity", view.opacity);
        }
    }

    fn apply_button(&self) {
        let state = self.session.borrow().state().button();
        if let Ok(button) = dom::query::<HtmlButtonElement>(".analyze-btn") {
            button.set_text_content(Some(state.label));
            button.set_disabled(state.disabled);
        }
    }

    fn render(&self, view: &ResultView) -> Result<(), JsValue> {
        dom::set_text("totalEmission", &view.total_emission)?;
        render_suggestions(&view.suggestions)?;

        if let Some(extended) = &view.extended {
            self.render_extended(extended)?;
        }
        Ok(())
    }

    fn render_extended(&self, view: &ExtendedView) -> Result<(), JsValue> {
        dom::set_text("totalUnits", &view.summary.total_units)?;
        dom::set_text("avgEmission", &view.summary.avg_emission)?;
        dom::set_text("highestImpact", &view.summary.highest_impact)?;

        render_chart(&self.category_chart, CATEGORY_CANVAS, &view.category_chart)?;
        render_chart(&self.source_chart, SOURCE_CANVAS, &view.source_chart)?;
        render_report(&view.report)
    }
}

fn render_chart(
    slot: &RefCell<ChartSlot<ChartJsHandle>>,
    canvas_id: &str,
    spec: &ChartSpec,
) -> Result<(), JsValue> {
    slot.borrow_mut()
        .render(spec, |spec| ChartJsHandle::create(canvas_id, spec))
}

pub fn render_suggestions(list: &SuggestionListView) -> Result<(), JsValue> {
    let ul = dom::by_id::<Element>("suggestionList")?;
    dom::clear_children(&ul);

    match list {
        SuggestionListView::Placeholder(text) => {
            ul.append_child(&dom::element("li", None, Some(text.as_str()))?.into())?;
        }
        SuggestionListView::Items(items) => {
            for item in items {
                let li = dom::element("li", None, None)?;
                li.append_child(&dom::element("strong", None, Some(item.headline().as_str()))?.into())?;
                li.append_child(&dom::element("br", None, None)?.into())?;
                li.append_child(&dom::element("small", None, Some(item.reduction.as_str()))?.into())?;
                li.append_child(&dom::element("span", Some("risk-badge"), Some(item.risk_badge.as_str()))?.into())?;
                ul.append_child(&li)?;
            }
        }
    }
    Ok(())
}

pub fn render_report(report: &ReportView) -> Result<(), JsValue> {
    let body = dom::by_id::<HtmlTableSectionElement>("reportTableBody")?;
    dom::clear_children(&body);

    let report_box = dom::by_id::<Element>("reportBox")?;
    if !report.visible {
        report_box.class_list().add_1("hidden")?;
        return Ok(());
    }
    report_box.class_list().remove_1("hidden")?;

    for row in &report.rows {
        let tr = body.insert_row()?.dyn_into::<HtmlTableRowElement>()?;
        for text in [&row.id, &row.product, &row.source, &row.total_emission] {
            tr.insert_cell()?.set_text_content(Some(text.as_str()));
        }
        let risk = tr.insert_cell()?;
        risk.append_child(&dom::element("span", Some(row.badge_class.as_str()), Some(row.risk_level.as_str()))?.into())?;
    }
    Ok(())
}
