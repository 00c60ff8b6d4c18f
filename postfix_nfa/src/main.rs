use postfix_nfa::{to_postfix, Compiler, Matcher};

fn main() {
    println!("Shunting-yard + Thompson NFA - Matching Demo");
    println!("============================================");

    let patterns = ["a.b.c*", "a.(b|d).c*", "(a.(b|d))*", "a.(b.b)*.c", "a.b.c.d+"];
    let subjects = ["", "abc", "abbc", "abad", "abbbc", "abcdd"];

    for pattern in patterns {
        println!("\n=== Pattern: '{}' ===", pattern);

        let postfix = match to_postfix(pattern) {
            Ok(postfix) => postfix,
            Err(e) => {
                println!("Failed to convert pattern: {}", e);
                continue;
            }
        };
        println!("Postfix: {}", postfix);

        let nfa = match Compiler::new().compile(&postfix) {
            Ok(nfa) => nfa,
            Err(e) => {
                println!("Failed to compile: {}", e);
                continue;
            }
        };
        print!("{}", nfa);

        let matcher = Matcher::new(&nfa);
        for subject in subjects {
            println!("{:<5} {} {:?}", matcher.is_match(subject), pattern, subject);
        }
    }
}
