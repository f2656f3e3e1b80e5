use crate::web::model::{EvenPage, MatrixPage, NthLargestPage};
use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = "
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background: #f4f7fa;
       display: flex; justify-content: center; padding: 20px; color: #2c3e50; }
.container { background: #fff; padding: 40px; border-radius: 16px; max-width: 640px; width: 100%;
             box-shadow: 0 10px 40px rgba(0, 0, 0, 0.07); border: 1px solid #e0e0e0; }
h1 { color: #667eea; margin-bottom: 25px; }
label { display: block; font-weight: 500; margin: 12px 0 6px; }
input, textarea { width: 100%; padding: 10px; border-radius: 10px; border: 2px solid #ccc;
                  font-family: monospace; box-sizing: border-box; }
button { margin-top: 16px; padding: 10px 24px; border: 0; border-radius: 10px;
         background: linear-gradient(135deg, #667eea, #764ba2); color: #fff; cursor: pointer; }
.result { margin-top: 24px; padding: 16px; border-radius: 10px; background: #eef7ee; }
.error { background: #fdecea; color: #a33; }
.numbers-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(60px, 1fr)); gap: 8px; }
.number-item { background: #f0f2ff; border-radius: 8px; padding: 8px; text-align: center; }
pre { white-space: pre-wrap; }
";

fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                div class="container" {
                    h1 { (title) }
                    (body)
                    p { a href="/" { "All calculators" } }
                }
            }
        }
    }
}

fn error_box(message: &str) -> Markup {
    html! {
        div class="result error" { strong { "Error: " } (message) }
    }
}

pub fn index() -> Markup {
    layout(
        "Calculators",
        html! {
            ul {
                li { a href="/nth-largest" { "Nth largest number" } }
                li { a href="/matrix" { "Matrix multiplication" } }
                li { a href="/evens?n=10" { "Even numbers generator" } }
            }
        },
    )
}

pub fn nth_largest(page: &NthLargestPage) -> Markup {
    layout(
        "Nth Largest Number Finder",
        html! {
            form method="post" action="/nth-largest" {
                label for="numbers" { "Numbers (comma separated)" }
                input type="text" id="numbers" name="numbers" placeholder="45, 23, 78, 12"
                    value=(page.form.numbers);
                label for="n" { "Which largest (n)" }
                input type="number" id="n" name="n" min="1" value=(page.form.n);
                button type="submit" { "Find" }
            }
            @match &page.outcome {
                Some(Ok(found)) => {
                    div class="result" {
                        p { "The " (found.rank) (ordinal_suffix(found.rank)) " largest number is " strong { (found.value) } }
                        p { "Sorted (descending): " (join_values(&found.sorted_descending)) }
                    }
                }
                Some(Err(err)) => { (error_box(&err.to_string())) }
                None => {}
            }
        },
    )
}

pub fn matrix(page: &MatrixPage) -> Markup {
    layout(
        "Matrix Multiplication",
        html! {
            form method="post" action="/matrix" {
                label for="matrix1" { "Matrix 1 (rows on separate lines, values separated by spaces)" }
                textarea id="matrix1" name="matrix1" rows="4" placeholder="1 2\n3 4" { (page.form.matrix1) }
                label for="matrix2" { "Matrix 2" }
                textarea id="matrix2" name="matrix2" rows="4" placeholder="5 6\n7 8" { (page.form.matrix2) }
                button type="submit" { "Multiply" }
            }
            @match &page.outcome {
                Some(Ok(product)) => {
                    div class="result" {
                        h3 { "Result" }
                        pre { (product) }
                    }
                }
                Some(Err(err)) => { (error_box(&err.to_string())) }
                None => {}
            }
        },
    )
}

pub fn evens(page: &EvenPage) -> Markup {
    layout(
        "Even Numbers Generator",
        html! {
            form method="get" action="/evens" {
                label for="n" { "Enter number of even numbers:" }
                input type="number" id="n" name="n" min="1" max=(page.max) value=(page.n);
                button type="submit" { "Generate" }
            }
            @match &page.outcome {
                Some(Ok(numbers)) => {
                    div class="result" {
                        h3 { "First " (numbers.len()) " even numbers:" }
                        div class="numbers-grid" {
                            @for number in numbers {
                                div class="number-item" { (number) }
                            }
                        }
                    }
                }
                Some(Err(err)) => { (error_box(&err.to_string())) }
                None => {}
            }
        },
    )
}

fn join_values(values: &[i64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn ordinal_suffix(n: usize) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
