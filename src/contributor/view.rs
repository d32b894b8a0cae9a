//! HTML for a trip's contributors and the form for adding one.

use maud::{Markup, html};

use crate::{
    contributor::Contributor,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_TEXT_INPUT_STYLE, delete_action_button},
    trip::TripId,
};

pub fn contributors_view(trip_id: TripId, contributors: &[Contributor]) -> Markup {
    html! {
        section class=(CARD_STYLE)
        {
            h2 class="text-lg font-semibold mb-2" { "Contributors" }

            @if contributors.is_empty() {
                p class="text-gray-500 dark:text-gray-400 mb-2" { "No contributors yet" }
            } @else {
                ul id="contributors" class="mb-4 divide-y divide-gray-200 dark:divide-gray-700"
                {
                    @for contributor in contributors {
                        @let delete_url = endpoints::format_endpoint(
                            endpoints::DELETE_CONTRIBUTOR,
                            contributor.id,
                        );
                        @let confirm_message = format!(
                            "Remove {} from this trip?",
                            contributor.name
                        );

                        li class="flex justify-between items-center py-2"
                            data-contributor-id=(contributor.id)
                        {
                            span
                            {
                                (contributor.name)

                                @if let Some(email) = &contributor.email {
                                    span class="ml-2 text-sm text-gray-500 dark:text-gray-400"
                                    {
                                        (email)
                                    }
                                }
                            }

                            (delete_action_button(&delete_url, &confirm_message, "closest li", "delete"))
                        }
                    }
                }
            }

            form
                hx-post=(endpoints::format_endpoint(endpoints::POST_CONTRIBUTOR, trip_id))
                hx-target-error="#alert-container"
                class="flex flex-col gap-2 sm:flex-row"
            {
                input
                    name="name"
                    type="text"
                    placeholder="Name"
                    aria-label="Contributor name"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                input
                    name="email"
                    type="email"
                    placeholder="Email (optional)"
                    aria-label="Contributor email"
                    class=(FORM_TEXT_INPUT_STYLE);

                button type="submit" class={ (BUTTON_PRIMARY_STYLE) " sm:w-auto" } { "Add" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::{balance::test_helpers::contributor, endpoints};

    use super::contributors_view;

    #[test]
    fn lists_contributors_with_delete_buttons() {
        let contributors = vec![contributor(1, "Alice"), contributor(2, "Bob")];

        let html = Html::parse_fragment(&contributors_view(3, &contributors).into_string());

        let delete_urls = html
            .select(&Selector::parse("#contributors button").unwrap())
            .map(|button| button.value().attr("hx-delete").unwrap().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(
            delete_urls,
            vec![
                endpoints::format_endpoint(endpoints::DELETE_CONTRIBUTOR, 1),
                endpoints::format_endpoint(endpoints::DELETE_CONTRIBUTOR, 2),
            ]
        );
    }

    #[test]
    fn add_form_posts_to_trip() {
        let html = Html::parse_fragment(&contributors_view(3, &[]).into_string());

        let form = html.select(&Selector::parse("form").unwrap()).next().unwrap();
        assert_eq!(
            form.value().attr("hx-post"),
            Some(endpoints::format_endpoint(endpoints::POST_CONTRIBUTOR, 3).as_str())
        );
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("No contributors yet"));
    }
}
