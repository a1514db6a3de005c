use maud::{Markup, html};

use crate::{
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner},
};

/// The id of the spreadsheet upload form.
pub const IMPORT_FORM_ID: &str = "import-form";

/// Render the spreadsheet upload form.
///
/// A successful upload replaces the beneficiary section, failures go to the
/// alert container.
pub fn import_form_view() -> Markup {
    let spinner = loading_spinner();

    html! {
        form
            id=(IMPORT_FORM_ID)
            hx-post=(endpoints::IMPORT)
            enctype="multipart/form-data"
            hx-target="#beneficiaries"
            hx-swap="outerHTML"
            hx-disabled-elt="#files, #import-button"
            hx-indicator="#import-indicator"
            hx-target-error="#alert-container"
            class="w-full space-y-4"
        {
            div
            {
                label for="files" class=(FORM_LABEL_STYLE)
                {
                    "Choose spreadsheet(s) to upload"
                }

                input
                    id="files"
                    type="file"
                    name="files"
                    accept="text/csv,.csv"
                    multiple
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                p class="mt-2 text-sm text-gray-500 dark:text-gray-400"
                {
                    "Save your spreadsheet as CSV. The first line must hold the column names, \
                    for example Nom, Téléphone, Référence, Mode and RIB."
                }
            }

            button
                type="submit"
                id="import-button"
                class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="import-indicator" { (spinner) }
                " Import"
            }
        }
    }
}

#[cfg(test)]
mod import_form_view_tests {
    use scraper::{ElementRef, Html, Selector};

    use crate::{
        endpoints,
        spreadsheet_import::{IMPORT_FORM_ID, import_form_view},
        test_utils::{
            assert_form_submit_button, assert_hx_endpoint, assert_valid_html, must_get_form_by_id,
        },
    };

    #[test]
    fn render_form() {
        let html = Html::parse_fragment(&import_form_view().into_string());
        assert_valid_html(&html);

        let form = must_get_form_by_id(&html, IMPORT_FORM_ID);
        assert_hx_endpoint(&form, endpoints::IMPORT, "hx-post");
        assert_eq!(form.value().attr("enctype"), Some("multipart/form-data"));
        assert_file_input(&form, "files");
        assert_form_submit_button(&form);
    }

    #[track_caller]
    fn assert_file_input(form: &ElementRef, name: &str) {
        let input = form
            .select(&Selector::parse(&format!("input[name={name}]")).unwrap())
            .next()
            .unwrap_or_else(|| panic!("No input found with name \"{name}\""));

        assert_eq!(input.value().attr("type"), Some("file"));
        assert!(input.value().attr("required").is_some());
        assert!(input.value().attr("multiple").is_some());
        assert_eq!(input.value().attr("accept"), Some("text/csv,.csv"));
    }
}
