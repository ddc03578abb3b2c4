/*!

# Quick start with an online form

This example runs a vote end to end, using an online form to collect the
ballots. Any form tool that can export its responses as a spreadsheet works.

**Creating a poll** Add one question per choice: `First choice`,
`Second choice`, `Third choice`. Each question is a drop-down list with the
names of all the candidates. Only the first question should be mandatory,
so that voters can rank as many candidates as they want.

**Getting the results** Once the poll is closed, download the responses in
the Excel format (xlsx). The first row holds the names of the questions and
each other row is a ballot. The first column is usually a timestamp, so the
choices start in the second column:

|                     | First choice | Second choice | Third choice |
|---------------------|--------------|---------------|--------------|
| 2022/10/21 09:55:59 | Alice        | Bob           |              |
| 2022/10/21 09:56:12 | Charlie      | Alice         | Bob          |
| 2022/10/21 09:57:40 | Alice        |               |              |

Run `irvtab` with the following command (the name of the file may differ for
you):

```bash
irvtab -i 'responses.xlsx' --input-type xlsx --first-vote-column 2
```

After running this command, you should see the outcome of the election:

```text
[2022-10-21T09:55:59Z INFO  instant_runoff::rounds] Round 1 (ballots: 3) tally: [("Alice", 2), ("Bob", 0), ("Charlie", 1)]
[2022-10-21T09:55:59Z INFO  instant_runoff::rounds] Round 1: elected ["Alice"]
```

With these few example votes, `Alice` holds 2 of the 3 first choices and wins
in the first round. Your results will vary depending on the contents of the
votes.

**Saving the output** The finishing order and the details of every round can
be written to a file with the `--out` flag:

```bash
irvtab -i 'responses.xlsx' --input-type xlsx --first-vote-column 2 --out results.json
```

See the [manual](../manual/index.html) for the other input formats and for
the configuration file.

*/
