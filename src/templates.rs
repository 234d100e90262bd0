use maud::{DOCTYPE, Markup, html};

use crate::{
    flash::{Flash, Level},
    models::{Movie, User},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub fn index_page(users: &[User], flashes: &[Flash]) -> String {
    page(
        "MoviWeb",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    (flash_banners(flashes))

                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { "MoviWeb" }
                        p class="mt-2 text-gray-600" { "Pick a user to see their favorite movies, or add a new one." }

                        form class="mt-8 flex gap-3" method="post" action="/users" {
                            input class="flex-1 rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500" name="name" placeholder="New user name" required;
                            button class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Add user" }
                        }

                        @if users.is_empty() {
                            p class="mt-8 text-gray-500" { "No users yet." }
                        } @else {
                            ul class="mt-8 divide-y divide-gray-100" {
                                @for user in users {
                                    li class="flex items-center justify-between py-3" {
                                        a class="text-blue-600 hover:text-blue-800 font-medium" href=(movies_path(user.id)) { (user.name) }
                                        form method="post" action=(format!("/users/{}/delete", user.id)) {
                                            button class="text-sm text-red-600 hover:text-red-800" type="submit" { "Delete" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn movies_page(user: &User, movies: &[Movie], search: &str, flashes: &[Flash]) -> String {
    page(
        &format!("{}'s movies", user.name),
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-10" {
                    (flash_banners(flashes))

                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { (user.name) "'s favorite movies" }
                            p class="mt-2 text-gray-600" { (movies.len()) " movie" @if movies.len() != 1 { "s" } }
                        }
                        a class="text-sm text-blue-600 hover:text-blue-800" href="/" { "All users" }
                    }

                    div class="mt-8 grid gap-4 md:grid-cols-2" {
                        form class="flex gap-3" method="get" action=(movies_path(user.id)) {
                            input class="flex-1 rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500" name="q" value=(search) placeholder="Search titles";
                            button class="rounded-md bg-gray-700 px-4 py-2 font-semibold text-white hover:bg-gray-800" type="submit" { "Search" }
                        }
                        form class="flex gap-3" method="post" action=(movies_path(user.id)) {
                            input class="flex-1 rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500" name="title" placeholder="Movie title" required;
                            button class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Add movie" }
                        }
                    }

                    @if movies.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            @if search.is_empty() {
                                p class="text-gray-600" { "No movies yet. Add one above." }
                            } @else {
                                p class="text-gray-600" { "No titles match \"" (search) "\"." }
                            }
                        }
                    } @else {
                        div class="mt-10 space-y-4" {
                            @for movie in movies {
                                (movie_card(user.id, movie))
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn not_found_page() -> String {
    page(
        "Not found",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "404 — Not found" }
                        p class="mt-4 text-gray-700" { "That user or movie doesn't exist." }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

pub fn error_page(message: String) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error" }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn flash_banners(flashes: &[Flash]) -> Markup {
    html! {
        @if !flashes.is_empty() {
            div class="mb-6 space-y-2" {
                @for flash in flashes {
                    div class=(format!("rounded-md border px-4 py-3 text-sm {}", flash_colors(flash.level))) {
                        (flash.message)
                    }
                }
            }
        }
    }
}

fn flash_colors(level: Level) -> &'static str {
    match level {
        Level::Success => "border-green-300 bg-green-50 text-green-800",
        Level::Info => "border-blue-300 bg-blue-50 text-blue-800",
        Level::Warning => "border-yellow-300 bg-yellow-50 text-yellow-800",
    }
}

fn movie_card(user_id: i32, movie: &Movie) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6" {
            div class="flex items-start gap-4" {
                @if let Some(poster) = &movie.poster_url {
                    img class="h-28 w-20 rounded object-cover" src=(poster) alt=(format!("{} poster", movie.title));
                } @else {
                    div class="h-28 w-20 rounded bg-gray-100 flex items-center justify-center text-xs text-gray-400" { "No poster" }
                }

                div class="flex-1" {
                    h2 class="text-xl font-semibold text-gray-900" {
                        (movie.title)
                        @if let Some(year) = movie.year {
                            span class="ml-2 font-normal text-gray-500" { "(" (year) ")" }
                        }
                    }
                    @if let Some(director) = &movie.director {
                        p class="mt-1 text-sm text-gray-600" { "Directed by " (director) }
                    }

                    details class="mt-3" {
                        summary class="cursor-pointer text-sm text-blue-600 hover:text-blue-800" { "Edit" }
                        form class="mt-3 grid gap-2 md:grid-cols-3" method="post" action=(format!("/users/{}/movies/{}/update", user_id, movie.id)) {
                            input class="rounded-md border border-gray-300 px-3 py-1.5 text-sm" name="new_title" placeholder="New title";
                            input class="rounded-md border border-gray-300 px-3 py-1.5 text-sm" name="new_year" placeholder="New year";
                            input class="rounded-md border border-gray-300 px-3 py-1.5 text-sm" name="new_director" placeholder="New director";
                            button class="md:col-span-3 rounded-md bg-gray-700 px-3 py-1.5 text-sm font-semibold text-white hover:bg-gray-800" type="submit" { "Save" }
                        }
                    }
                }

                form method="post" action=(format!("/users/{}/movies/{}/delete", user_id, movie.id)) {
                    button class="text-sm text-red-600 hover:text-red-800" type="submit" { "Delete" }
                }
            }
        }
    }
}

fn movies_path(user_id: i32) -> String {
    format!("/users/{user_id}/movies")
}
