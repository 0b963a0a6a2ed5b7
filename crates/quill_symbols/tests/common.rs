/// A small program touching every kind of symbol
pub const PROGRAM: &str = "\
int total = 0;
float rate = 1.5;
string name = \"quill\";

do add(int a, int b) {
    return a + b;
}

for (int i = 0, i < 10, i++) {
    total = total + i;
}

print(call add(total, i));
";
